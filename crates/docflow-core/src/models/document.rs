use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::storage_types::StorageBackend;

/// A persisted, fully ingested document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    /// Stored object name, `{uuid}.{ext}`
    pub filename: String,
    pub original_filename: Option<String>,
    pub storage_key: String,
    pub storage_backend: StorageBackend,
    pub content_type: String,
    pub file_size: i64,
    pub text: String,
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Extension of the stored object (`pdf`, `ppt`, `csv`).
    pub fn extension(&self) -> &str {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("bin")
    }

    /// Deterministic attachment name used for downloads.
    pub fn download_filename(&self) -> String {
        format!("document_{}.{}", self.id, self.extension())
    }
}

/// Fields for a new row. The repository assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub original_filename: Option<String>,
    pub storage_key: String,
    pub storage_backend: StorageBackend,
    pub content_type: String,
    pub file_size: i64,
    pub text: String,
    pub metadata: Map<String, Value>,
}

/// Text and metadata returned by the parsing service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContent {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    pub file_size: i64,
    pub content_type: String,
    pub text: String,
    #[schema(value_type = Object)]
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        DocumentResponse {
            id: doc.id,
            filename: doc.filename,
            original_filename: doc.original_filename,
            file_size: doc.file_size,
            content_type: doc.content_type,
            text: doc.text,
            metadata: doc.metadata,
            created_at: doc.created_at,
        }
    }
}
