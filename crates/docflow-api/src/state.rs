//! Shared application state handed to every handler.

use crate::services::DocumentPipeline;
use docflow_core::Config;
use docflow_services::AnswerEngine;
use std::sync::Arc;

/// Collaborators are built once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: DocumentPipeline,
    /// `None` when no answering engine is configured; NLP routes then answer 503.
    pub answer_engine: Option<Arc<dyn AnswerEngine>>,
}

impl AppState {
    pub fn new(
        config: Config,
        pipeline: DocumentPipeline,
        answer_engine: Option<Arc<dyn AnswerEngine>>,
    ) -> Self {
        Self {
            config,
            pipeline,
            answer_engine,
        }
    }
}
