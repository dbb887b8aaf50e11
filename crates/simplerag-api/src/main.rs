//! SimpleRAG API Server
//!
//! HTTP server for the SimpleRAG demo: upload a document, chat with it.

use std::sync::Arc;

use simplerag_api::{create_router, state::AppState};
use simplerag_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simplerag_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;

    if config.gemini.api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY not found. Chat functionality may fail.");
    }

    // Ensure the upload directory exists
    tokio::fs::create_dir_all(&config.storage.data_dir).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state and attempt to load a persisted index
    let state = Arc::new(AppState::new(config));
    if state.get_or_load_index().await.is_some() {
        tracing::info!("Loaded persisted index");
    } else {
        tracing::info!("No persisted index found; waiting for first upload");
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("SimpleRAG API server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
