//! Document pipeline: upload, retrieval, download, reparse and deletion workflows.
//!
//! The pipeline owns every cross-collaborator ordering decision. Storage, parser and
//! repository each guarantee atomicity for a single key or row; the pipeline keeps them
//! consistent with each other.
//!
//! Upload writes the object first, then parses, then persists. A failure after the
//! object is written triggers a best-effort delete of that object. If the compensating
//! delete also fails the key is logged with `orphaned_storage_key` for later cleanup.
//!
//! Delete removes the object first and the row last, so a failure never leaves a row
//! pointing at nothing without an error reaching the caller.

use bytes::Bytes;
use docflow_core::models::{Document, ExtractedContent, NewDocument};
use docflow_core::{validation, AppError, DeleteStage, UploadStage};
use docflow_db::DocumentStore;
use docflow_services::DocumentParser;
use docflow_storage::{generate_filename, storage_key_for, ByteStream, Storage, StorageError};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Raw upload as received from the caller.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Bytes,
    pub content_type: String,
    pub original_filename: Option<String>,
    /// Size announced by the client. Advisory only; the byte length of `data` is recorded.
    pub declared_size: Option<u64>,
}

/// A document record together with a stream over its stored bytes.
pub struct DocumentDownload {
    pub document: Document,
    pub stream: ByteStream,
    /// `document_{id}.{ext}`
    pub filename: String,
}

#[derive(Clone)]
pub struct DocumentPipeline {
    storage: Arc<dyn Storage>,
    parser: Arc<dyn DocumentParser>,
    repository: Arc<dyn DocumentStore>,
    max_document_size: usize,
}

impl DocumentPipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        parser: Arc<dyn DocumentParser>,
        repository: Arc<dyn DocumentStore>,
        max_document_size: usize,
    ) -> Self {
        Self {
            storage,
            parser,
            repository,
            max_document_size,
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn repository(&self) -> &Arc<dyn DocumentStore> {
        &self.repository
    }

    pub fn max_document_size(&self) -> usize {
        self.max_document_size
    }

    /// Validate, store, parse and persist a new document.
    ///
    /// Nothing is written and no collaborator is called when the content type or size
    /// is rejected.
    #[tracing::instrument(
        skip(self, request),
        fields(content_type = %request.content_type, size_bytes = request.data.len())
    )]
    pub async fn upload_and_parse(&self, request: UploadRequest) -> Result<Document, AppError> {
        let start = Instant::now();

        let extension = validation::ensure_supported(&request.content_type)?;
        validation::ensure_size(request.data.len(), self.max_document_size)?;

        let file_size = request.data.len();
        if let Some(declared) = request.declared_size {
            if declared != file_size as u64 {
                tracing::debug!(
                    declared_size = declared,
                    actual_size = file_size,
                    "Declared upload size differs from received bytes"
                );
            }
        }

        let content_type = validation::normalize_content_type(&request.content_type);
        let filename = generate_filename(extension);
        let storage_key = storage_key_for(&filename);

        self.storage
            .put(&storage_key, request.data, &content_type)
            .await
            .map_err(|e| AppError::upload_failed(UploadStage::Storage, e))?;

        let extracted = match self.extract(&storage_key).await {
            Ok(content) => content,
            Err(e) => {
                self.discard_object(&storage_key, UploadStage::Parsing).await;
                return Err(e);
            }
        };

        let new_document = NewDocument {
            filename,
            original_filename: request.original_filename,
            storage_key: storage_key.clone(),
            storage_backend: self.storage.backend_type(),
            content_type,
            file_size: file_size as i64,
            text: extracted.text,
            metadata: extracted.metadata,
        };

        let document = match self.repository.create(new_document).await {
            Ok(document) => document,
            Err(e) => {
                self.discard_object(&storage_key, UploadStage::Persistence)
                    .await;
                return Err(AppError::upload_failed(UploadStage::Persistence, e));
            }
        };

        tracing::info!(
            document_id = %document.id,
            storage_key = %document.storage_key,
            file_size = document.file_size,
            text_len = document.text.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Document ingested"
        );

        Ok(document)
    }

    /// `None` when no document has this id.
    pub async fn get(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        self.repository.get(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Document>, AppError> {
        self.repository.list_all().await
    }

    /// Remove the stored object, then the row.
    ///
    /// Returns `false` without touching storage when the id is unknown. A storage failure
    /// keeps the row so the delete can be retried.
    #[tracing::instrument(skip(self), fields(document_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let Some(document) = self.repository.get(id).await? else {
            return Ok(false);
        };

        self.storage
            .delete(&document.storage_key)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    storage_key = %document.storage_key,
                    "Failed to remove stored object; document record kept"
                );
                AppError::delete_failed(DeleteStage::ObjectRemoval, e)
            })?;

        let removed = self.repository.delete(id).await.map_err(|e| {
            tracing::error!(
                error = %e,
                storage_key = %document.storage_key,
                "Stored object removed but document record could not be deleted"
            );
            AppError::delete_failed(DeleteStage::RecordRemoval, e)
        })?;

        if !removed {
            tracing::warn!(
                storage_key = %document.storage_key,
                "Document record disappeared during delete"
            );
        }

        tracing::info!(storage_key = %document.storage_key, "Document deleted");
        Ok(removed)
    }

    /// Stream the stored bytes of a document.
    ///
    /// A live row whose object is gone is reported as `StorageInconsistency`.
    #[tracing::instrument(skip(self), fields(document_id = %id))]
    pub async fn download(&self, id: Uuid) -> Result<DocumentDownload, AppError> {
        let document = self.require(id).await?;

        let stream = self
            .storage
            .download_stream(&document.storage_key)
            .await
            .map_err(|e| missing_object_error(&document, e))?;

        let filename = document.download_filename();
        Ok(DocumentDownload {
            document,
            stream,
            filename,
        })
    }

    /// Run extraction again for a stored document and replace its text and metadata.
    ///
    /// On parse failure the record is left as it was.
    #[tracing::instrument(skip(self), fields(document_id = %id))]
    pub async fn reparse(&self, id: Uuid) -> Result<Document, AppError> {
        let document = self.require(id).await?;

        let exists = self
            .storage
            .exists(&document.storage_key)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        if !exists {
            return Err(missing_object_error(
                &document,
                StorageError::NotFound(document.storage_key.clone()),
            ));
        }

        let extracted = self.extract(&document.storage_key).await?;

        self.repository
            .update_content(id, extracted.text, extracted.metadata)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))
    }

    async fn require(&self, id: Uuid) -> Result<Document, AppError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))
    }

    async fn extract(&self, storage_key: &str) -> Result<ExtractedContent, AppError> {
        let location = self
            .storage
            .location(storage_key)
            .map_err(|e| AppError::upload_failed(UploadStage::Parsing, e))?;

        self.parser.extract(&location).await.map_err(|e| {
            tracing::warn!(error = %e, location = %location, "Document parsing failed");
            AppError::upload_failed(UploadStage::Parsing, e)
        })
    }

    /// Best-effort removal of an object that no record will reference.
    async fn discard_object(&self, storage_key: &str, failed_stage: UploadStage) {
        match self.storage.delete(storage_key).await {
            Ok(()) => tracing::debug!(
                storage_key,
                failed_stage = %failed_stage,
                "Removed stored object after failed upload"
            ),
            Err(e) => tracing::error!(
                error = %e,
                orphaned_storage_key = storage_key,
                failed_stage = %failed_stage,
                "Failed to remove stored object after failed upload"
            ),
        }
    }
}

fn missing_object_error(document: &Document, err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(_) => {
            tracing::error!(
                document_id = %document.id,
                storage_key = %document.storage_key,
                "Document record references a missing stored object"
            );
            AppError::StorageInconsistency(format!(
                "Stored object for document {} is missing",
                document.id
            ))
        }
        other => AppError::Storage(other.to_string()),
    }
}
