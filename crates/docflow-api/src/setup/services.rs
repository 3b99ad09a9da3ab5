//! Collaborator construction and wiring

use crate::services::DocumentPipeline;
use crate::state::AppState;
use anyhow::{Context, Result};
use docflow_core::Config;
use docflow_db::{DocumentRepository, DocumentStore};
use docflow_services::{AnswerEngine, DocumentParser, HttpAnswerEngine, UnstructuredParser};
use docflow_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Build the parser, repository and answering engine, and wire them into the pipeline.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let parser: Arc<dyn DocumentParser> = Arc::new(
        UnstructuredParser::new(
            config.parser_api_url().to_string(),
            config.parser_api_key().map(String::from),
            Duration::from_secs(config.parser_timeout_secs()),
        )
        .context("Failed to create document parser client")?,
    );
    tracing::info!(
        endpoint = %config.parser_api_url(),
        timeout_secs = config.parser_timeout_secs(),
        "Document parser configured"
    );

    let repository: Arc<dyn DocumentStore> = Arc::new(DocumentRepository::new(pool));

    let answer_engine: Option<Arc<dyn AnswerEngine>> = match config.answer_api_url() {
        Some(url) => {
            let engine = HttpAnswerEngine::new(
                url.to_string(),
                config.answer_api_key().map(String::from),
                Duration::from_secs(config.answer_timeout_secs()),
            )
            .context("Failed to create answering engine client")?;
            tracing::info!(endpoint = %url, "Answering engine configured");
            Some(Arc::new(engine))
        }
        None => {
            tracing::warn!("ANSWER_API_URL not set; NLP endpoints will return 503");
            None
        }
    };

    let pipeline = DocumentPipeline::new(
        storage,
        parser,
        repository,
        config.max_document_size_bytes(),
    );

    Ok(Arc::new(AppState::new(
        config.clone(),
        pipeline,
        answer_engine,
    )))
}
