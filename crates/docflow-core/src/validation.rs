//! Format validation for incoming documents
//!
//! Pure functions, no I/O. Uploads are checked here before anything is written or sent
//! to the parsing service.

use crate::error::AppError;

/// Declared MIME types accepted for ingestion and the file extension each one is stored under.
pub const SUPPORTED_FORMATS: &[(&str, &str)] = &[
    ("application/pdf", "pdf"),
    ("application/vnd.ms-powerpoint", "ppt"),
    ("text/csv", "csv"),
];

/// Strip parameters (`; charset=...`), trim and lowercase a declared content type.
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Extension used in storage keys for a supported content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let normalized = normalize_content_type(content_type);
    SUPPORTED_FORMATS
        .iter()
        .find(|(mime, _)| *mime == normalized)
        .map(|(_, ext)| *ext)
}

pub fn is_supported(content_type: &str) -> bool {
    extension_for(content_type).is_some()
}

/// Returns the storage extension, or `UnsupportedFormat` naming the rejected type.
pub fn ensure_supported(content_type: &str) -> Result<&'static str, AppError> {
    extension_for(content_type).ok_or_else(|| AppError::UnsupportedFormat(content_type.to_string()))
}

/// Reject empty uploads and uploads above `max_size` bytes.
pub fn ensure_size(size: usize, max_size: usize) -> Result<(), AppError> {
    if size == 0 {
        return Err(AppError::InvalidInput("Uploaded file is empty".to_string()));
    }
    if size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size {} bytes exceeds the limit of {} bytes",
            size, max_size
        )));
    }
    Ok(())
}
