use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{error::AppResult, routes::AppState, services::title_search};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<serde_json::Value>,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let results = title_search::search_titles(state.metadata.as_ref(), &params.query).await?;
    Ok(Json(SearchResponse { results }))
}

/// Handler for single movie details
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let details = title_search::movie_details(state.metadata.as_ref(), movie_id).await?;
    Ok(Json(details))
}
