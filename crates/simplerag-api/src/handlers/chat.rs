//! Chat query handler

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use simplerag_index::QueryEngine;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Chat request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// User's question
    #[schema(example = "What does the report say about revenue?")]
    pub query: String,
}

/// Chat response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Generated answer
    pub response: String,
}

/// Answer a query against the uploaded document
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Query answered", body = ChatResponse),
        (status = 400, description = "Empty query or no index", body = crate::error::ApiError),
        (status = 500, description = "Downstream failure", body = crate::error::ApiError)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    if req.query.trim().is_empty() {
        return Err(AppError::BadRequest("Query cannot be empty".to_string()));
    }

    let index = state.get_or_load_index().await.ok_or_else(|| {
        AppError::BadRequest("No index found. Please upload a document first.".to_string())
    })?;

    let engine = QueryEngine::new(
        index,
        state.embedder.clone(),
        state.llm.clone(),
        state.config.index.top_k,
    );

    let response = engine.query(&req.query).await?;

    Ok(Json(ChatResponse { response }))
}
