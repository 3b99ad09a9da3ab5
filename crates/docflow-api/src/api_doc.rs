//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use docflow_core::models;

/// The served OpenAPI document.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docflow API",
        version = "0.1.0",
        description = "Document ingestion API (v0). PDF, PPT and CSV uploads are stored in object storage, parsed by an external extraction service and recorded with their text and metadata. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Documents
        handlers::document_upload::upload_document,
        handlers::document_get::list_documents,
        handlers::document_get::get_document,
        handlers::document_download::download_document,
        handlers::document_reparse::reparse_document,
        handlers::document_delete::delete_document,
        // NLP
        handlers::nlp::search,
        handlers::nlp::sentiment,
        handlers::nlp::entities,
    ),
    components(
        schemas(
            models::DocumentResponse,
            models::QuestionRequest,
            models::TextRequest,
            models::Sentiment,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "documents", description = "Document upload, retrieval, download, reparse and deletion"),
        (name = "nlp", description = "Question answering, sentiment and entity extraction"),
    )
)]
pub struct ApiDoc;
