//! Route groups: documents and NLP.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn document_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/documents", API_PREFIX),
            post(handlers::document_upload::upload_document)
                .get(handlers::document_get::list_documents),
        )
        .route(
            &format!("{}/documents/{{id}}", API_PREFIX),
            get(handlers::document_get::get_document)
                .delete(handlers::document_delete::delete_document),
        )
        .route(
            &format!("{}/documents/{{id}}/download", API_PREFIX),
            get(handlers::document_download::download_document),
        )
        .route(
            &format!("{}/documents/{{id}}/reparse", API_PREFIX),
            post(handlers::document_reparse::reparse_document),
        )
}

pub fn nlp_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/nlp/search", API_PREFIX), post(handlers::nlp::search))
        .route(&format!("{}/nlp/sentiment", API_PREFIX), post(handlers::nlp::sentiment))
        .route(&format!("{}/nlp/entities", API_PREFIX), post(handlers::nlp::entities))
}
