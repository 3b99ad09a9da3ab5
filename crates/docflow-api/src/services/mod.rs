//! Workflow services sitting between HTTP handlers and the collaborators.

pub mod document_pipeline;

pub use document_pipeline::{DocumentDownload, DocumentPipeline, UploadRequest};
