//! API route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{chat, health, upload};
use crate::state::AppState;

/// Create application routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/upload", post(upload::upload_handler))
        .route("/chat", post(chat::chat_handler))
}
