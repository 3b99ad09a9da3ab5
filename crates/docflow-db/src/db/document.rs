//! Document repository: CRUD for the documents table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docflow_core::models::{Document, NewDocument};
use docflow_core::{AppError, StorageBackend};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const DOCUMENT_COLUMNS: &str = "id, filename, original_filename, storage_key, storage_backend, \
     content_type, file_size, text, metadata, created_at, updated_at";

/// Persistence operations the pipeline needs.
///
/// Implementations give per-row atomicity only; keeping rows consistent with storage is
/// the caller's job.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document; the id and timestamps are assigned here.
    async fn create(&self, document: NewDocument) -> Result<Document, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Document>, AppError>;

    /// All documents, newest first.
    async fn list_all(&self) -> Result<Vec<Document>, AppError>;

    /// Replace extracted text and metadata. `None` if the row does not exist.
    async fn update_content(
        &self,
        id: Uuid,
        text: String,
        metadata: Map<String, Value>,
    ) -> Result<Option<Document>, AppError>;

    /// `true` if a row existed and was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Cheap connectivity check for health probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Row type for the documents table.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    filename: String,
    original_filename: Option<String>,
    storage_key: String,
    storage_backend: StorageBackend,
    content_type: String,
    file_size: i64,
    text: String,
    metadata: Json<Map<String, Value>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            filename: row.filename,
            original_filename: row.original_filename,
            storage_key: row.storage_key,
            storage_backend: row.storage_backend,
            content_type: row.content_type,
            file_size: row.file_size,
            text: row.text,
            metadata: row.metadata.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL-backed document repository.
#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    #[tracing::instrument(skip(self, document), fields(db.table = "documents", db.operation = "insert", storage_key = %document.storage_key))]
    async fn create(&self, document: NewDocument) -> Result<Document, AppError> {
        let row: DocumentRow = sqlx::query_as::<Postgres, DocumentRow>(&format!(
            r#"
            INSERT INTO documents (id, filename, original_filename, storage_key, storage_backend,
                                   content_type, file_size, text, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&document.filename)
        .bind(&document.original_filename)
        .bind(&document.storage_key)
        .bind(document.storage_backend)
        .bind(&document.content_type)
        .bind(document.file_size)
        .bind(&document.text)
        .bind(Json(&document.metadata))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let row: Option<DocumentRow> = sqlx::query_as::<Postgres, DocumentRow>(&format!(
            "SELECT {} FROM documents WHERE id = $1",
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    async fn list_all(&self) -> Result<Vec<Document>, AppError> {
        let rows: Vec<DocumentRow> = sqlx::query_as::<Postgres, DocumentRow>(&format!(
            "SELECT {} FROM documents ORDER BY created_at DESC, id",
            DOCUMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    #[tracing::instrument(skip(self, text, metadata), fields(db.table = "documents", db.operation = "update", db.record_id = %id))]
    async fn update_content(
        &self,
        id: Uuid,
        text: String,
        metadata: Map<String, Value>,
    ) -> Result<Option<Document>, AppError> {
        let row: Option<DocumentRow> = sqlx::query_as::<Postgres, DocumentRow>(&format!(
            r#"
            UPDATE documents
            SET text = $2, metadata = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .bind(&text)
        .bind(Json(&metadata))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }

    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
