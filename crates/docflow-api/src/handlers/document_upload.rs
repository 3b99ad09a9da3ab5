use crate::error::{ErrorResponse, HttpAppError};
use crate::services::UploadRequest;
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, sanitize_filename};
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use docflow_core::models::DocumentResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/documents",
    tag = "documents",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document stored, parsed and recorded", body = DocumentResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Unsupported document format", body = ErrorResponse),
        (status = 500, description = "Upload failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let file = extract_multipart_file(multipart).await?;

    let original_filename = match file.filename.as_deref() {
        Some(name) => Some(sanitize_filename(name)?),
        None => None,
    };

    let document = state
        .pipeline
        .upload_and_parse(UploadRequest {
            data: file.data,
            content_type: file.content_type,
            original_filename,
            declared_size: file.declared_size,
        })
        .await?;

    Ok(Json(DocumentResponse::from(document)))
}
