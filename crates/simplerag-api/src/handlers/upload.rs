//! Document upload handler

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use simplerag_index::VectorIndex;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Upload response
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "Successfully uploaded and indexed report.pdf")]
    pub message: String,
}

/// Upload a document and rebuild the index from it
///
/// The index is always rebuilt from just the uploaded file; any
/// previously indexed document is discarded. Whether upload should
/// instead accumulate a corpus is an open product question.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "documents",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "File field named `file`"),
    responses(
        (status = 200, description = "Document uploaded and indexed", body = UploadResponse),
        (status = 400, description = "Missing or invalid file field", body = crate::error::ApiError),
        (status = 500, description = "Indexing failed", body = crate::error::ApiError)
    )
)]
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let file_path = save_upload(&state, &mut multipart).await?;

    let splitter = state.splitter();
    let index = VectorIndex::build(&file_path, &splitter, state.embedder.as_ref()).await?;
    index.persist(&state.config.storage.persist_dir)?;

    let file_name = index.metadata.source_file.clone();
    state.set_index(Arc::new(index)).await;

    Ok(Json(UploadResponse {
        message: format!("Successfully uploaded and indexed {file_name}"),
    }))
}

/// Write the multipart `file` field into the data directory
async fn save_upload(state: &AppState, multipart: &mut Multipart) -> Result<PathBuf, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .ok_or_else(|| AppError::BadRequest("File field has no filename".to_string()))?;

        // Strip any path components a client might smuggle in
        let file_name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::BadRequest("Invalid filename".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        let data_dir = &state.config.storage.data_dir;
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let file_path = data_dir.join(&file_name);
        tokio::fs::write(&file_path, &data)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        tracing::info!(file = %file_name, bytes = data.len(), "Saved uploaded file");
        return Ok(file_path);
    }

    Err(AppError::BadRequest(
        "No file field in upload".to_string(),
    ))
}
