//! Answering engine client.
//!
//! Stateless forwarding of questions and text snippets to an external NLP service.

use async_trait::async_trait;
use docflow_core::models::Sentiment;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("Answer engine request failed: {0}")]
    Request(String),

    #[error("Answer engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Answer engine response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait AnswerEngine: Send + Sync {
    /// Answer a natural-language question.
    async fn answer(&self, question: &str) -> Result<String, AnswerError>;

    async fn analyze_sentiment(&self, text: &str) -> Result<Sentiment, AnswerError>;

    async fn extract_entities(&self, text: &str) -> Result<Vec<String>, AnswerError>;
}

#[derive(Debug, Serialize)]
struct QuestionRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

/// Engines answer either with a bare JSON value or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswerBody {
    Plain(String),
    Wrapped { answer: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntitiesBody {
    Plain(Vec<String>),
    Wrapped { entities: Vec<String> },
}

#[derive(Clone)]
pub struct HttpAnswerEngine {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpAnswerEngine {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AnswerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnswerError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, AnswerError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let start = Instant::now();
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self.client.post(&url).json(body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AnswerError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnswerError::Status { status, body });
        }

        let parsed = response
            .json::<R>()
            .await
            .map_err(|e| AnswerError::Decode(e.to_string()))?;

        tracing::debug!(
            path,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Answer engine call completed"
        );

        Ok(parsed)
    }
}

#[async_trait]
impl AnswerEngine for HttpAnswerEngine {
    async fn answer(&self, question: &str) -> Result<String, AnswerError> {
        let body: AnswerBody = self.post("search", &QuestionRequest { question }).await?;
        Ok(match body {
            AnswerBody::Plain(answer) | AnswerBody::Wrapped { answer } => answer,
        })
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<Sentiment, AnswerError> {
        self.post("sentiment", &TextRequest { text }).await
    }

    async fn extract_entities(&self, text: &str) -> Result<Vec<String>, AnswerError> {
        let body: EntitiesBody = self.post("entities", &TextRequest { text }).await?;
        Ok(match body {
            EntitiesBody::Plain(entities) | EntitiesBody::Wrapped { entities } => entities,
        })
    }
}
