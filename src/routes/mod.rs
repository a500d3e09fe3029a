use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{providers::MetadataProvider, Recommender},
};

pub mod movies;
pub mod recommendations;

/// Shared application state
///
/// Built once at startup and never mutated; handlers only read from it.
pub struct AppState {
    pub metadata: Arc<dyn MetadataProvider>,
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(metadata: Arc<dyn MetadataProvider>, recommender: Recommender) -> Self {
        Self {
            metadata,
            recommender,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(movies::search))
        .route("/movie/:id", get(movies::details))
        .route("/recommend", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
