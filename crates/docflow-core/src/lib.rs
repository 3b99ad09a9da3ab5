//! Docflow Core Library
//!
//! Domain models, the error taxonomy, configuration, and the format validator shared by
//! every Docflow crate.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, DocumentServiceConfig};
pub use error::{AppError, DeleteStage, ErrorMetadata, LogLevel, UploadStage};
pub use storage_types::StorageBackend;
