//! SimpleRAG API - HTTP server
//!
//! Exposes the upload and chat endpoints over axum, fronting the single
//! process-wide vector index.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(title = "SimpleRAG Chatbot API", description = "Minimal RAG demo service"),
    paths(
        handlers::health::health_check,
        handlers::upload::upload_handler,
        handlers::chat::chat_handler,
    ),
    components(schemas(
        error::ApiError,
        handlers::health::HealthResponse,
        handlers::upload::UploadResponse,
        handlers::chat::ChatRequest,
        handlers::chat::ChatResponse,
    ))
)]
pub struct ApiDoc;

/// Create the application router with all layers applied
pub fn create_router(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let max_body_size = state.config.server.max_body_size;

    Router::new()
        .merge(routes::api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
