//! Shared key generation for storage backends.
//!
//! Key format: `documents/{uuid}.{ext}`.

use uuid::Uuid;

const KEY_PREFIX: &str = "documents";

/// Fresh object name for an upload: a random v4 token plus the extension.
pub fn generate_filename(extension: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), extension)
}

/// Storage key for a generated filename.
pub fn storage_key_for(filename: &str) -> String {
    format!("{}/{}", KEY_PREFIX, filename)
}
