//! Backend-agnostic address of a stored object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage_types::StorageBackend;

/// Where a document's bytes live. Handed opaquely to the parsing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub backend: StorageBackend,
    pub bucket: Option<String>,
    pub key: String,
    /// `s3://bucket/key` or `file:///absolute/path`
    pub uri: String,
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}
