use std::{sync::Arc, time::Duration};

use reelmatch_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        llm::HuggingFaceClient, providers::TmdbProvider, GenerationSettings, Recommender,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelmatch_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let metadata = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
    ));

    let model = Arc::new(HuggingFaceClient::new(
        config.huggingface_api_url.clone(),
        config.huggingface_api_key.clone(),
        config.huggingface_model.clone(),
        Duration::from_secs(config.model_timeout_secs),
    ));

    let recommender = Recommender::new(
        model,
        metadata.clone(),
        GenerationSettings::from(&config),
    );

    let state = Arc::new(AppState::new(metadata, recommender));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        model = %config.huggingface_model,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
