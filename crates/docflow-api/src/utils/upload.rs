//! Multipart helpers for the upload handler

use axum::extract::Multipart;
use axum::http::header;
use bytes::Bytes;
use docflow_core::AppError;

/// The single file part of an upload form.
#[derive(Debug)]
pub struct MultipartFile {
    pub data: Bytes,
    pub filename: Option<String>,
    pub content_type: String,
    /// Size the client declared on the part itself, if any.
    pub declared_size: Option<u64>,
}

/// Extract the field named `file` from a multipart form.
/// Exactly one such field is accepted; other fields are ignored.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<MultipartFile, AppError> {
    let mut file: Option<MultipartFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if file.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let declared_size = field
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        file = Some(MultipartFile {
            data,
            filename,
            content_type,
            declared_size,
        });
    }

    file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))
}

/// Reduce a client-supplied filename to a safe display name.
///
/// Directory components are dropped, anything outside `[A-Za-z0-9._-]` becomes `_`, and
/// the result is capped at 255 characters. The name is display metadata only; storage keys
/// never derive from it.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    const MAX_FILENAME_LENGTH: usize = 255;

    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.chars().all(|c| c == '.') {
        return Err(AppError::InvalidInput("Filename has no usable characters".to_string()));
    }

    Ok(sanitized)
}
