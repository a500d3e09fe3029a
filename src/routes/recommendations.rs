use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse, SeedMovie},
    routes::AppState,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        genre_count = request.genres.len(),
        "Processing recommendation request"
    );

    let seed = SeedMovie::from(request);
    let outcome = state.recommender.recommend(&seed).await?;

    tracing::info!(
        request_id = %request_id,
        source = ?outcome.source,
        count = outcome.recommendations.len(),
        "Recommendation completed"
    );

    Ok(Json(RecommendationResponse {
        recommendations: outcome.recommendations,
    }))
}
