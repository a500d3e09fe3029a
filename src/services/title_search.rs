use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    services::providers::MetadataProvider,
};

/// Autocomplete list length
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// Service function for title search
///
/// A blank query short-circuits to no results; otherwise the provider's top
/// matches are returned in its order, exactly as the provider sent them.
pub async fn search_titles(provider: &dyn MetadataProvider, query: &str) -> AppResult<Vec<Value>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut results = provider.search_results(query).await?;
    results.truncate(SEARCH_RESULT_LIMIT);
    Ok(results)
}

/// Service function for single-title detail lookup
pub async fn movie_details(provider: &dyn MetadataProvider, movie_id: i64) -> AppResult<Value> {
    if movie_id <= 0 {
        return Err(AppError::InvalidInput(format!(
            "Movie id must be positive, got {}",
            movie_id
        )));
    }

    provider.movie_details(movie_id).await
}
