//! Document parsing gateway.
//!
//! The parsing service fetches the stored object by its location and returns extracted
//! text plus an open metadata map. Calls are not retried here; a timeout is reported like
//! any other failure.

use async_trait::async_trait;
use docflow_core::models::{ExtractedContent, ObjectLocation};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use thiserror::Error;

const API_KEY_HEADER: &str = "unstructured-api-key";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parser request failed: {0}")]
    Request(String),

    #[error("Parser timed out after {0:?}")]
    Timeout(Duration),

    #[error("Parser returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Parser response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait DocumentParser: Send + Sync {
    /// Extract text and metadata from the object at `location`.
    async fn extract(&self, location: &ObjectLocation) -> Result<ExtractedContent, ParseError>;
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket: Option<&'a str>,
    key: &'a str,
}

/// Client for an Unstructured-style partitioning API.
#[derive(Clone)]
pub struct UnstructuredParser {
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl UnstructuredParser {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ParseError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParseError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key,
            timeout,
            client,
        })
    }
}

#[async_trait]
impl DocumentParser for UnstructuredParser {
    async fn extract(&self, location: &ObjectLocation) -> Result<ExtractedContent, ParseError> {
        let start = Instant::now();
        let body = ExtractRequest {
            url: &location.uri,
            bucket: location.bucket.as_deref(),
            key: &location.key,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ParseError::Timeout(self.timeout)
            } else {
                ParseError::Request(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                location = %location,
                status,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Parser returned an error status"
            );
            return Err(ParseError::Status { status, body });
        }

        let payload: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ParseError::Timeout(self.timeout)
            } else {
                ParseError::Decode(e.to_string())
            }
        })?;

        let content = decode_response(payload)?;

        tracing::info!(
            location = %location,
            text_len = content.text.len(),
            metadata_keys = content.metadata.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Document parsed"
        );

        Ok(content)
    }
}

/// Accepts either `{text, metadata}` or a list of elements `[{text, metadata}, ...]`.
///
/// Element texts are joined with blank lines; the metadata of the first element is kept
/// and `element_count` is added. Missing fields default to empty.
pub fn decode_response(payload: Value) -> Result<ExtractedContent, ParseError> {
    match payload {
        Value::Object(mut object) => {
            let text = match object.remove("text") {
                Some(Value::String(text)) => text,
                Some(Value::Null) | None => String::new(),
                Some(other) => {
                    return Err(ParseError::Decode(format!(
                        "expected string for text, got {}",
                        other
                    )))
                }
            };
            let metadata = take_metadata(object.remove("metadata"))?;
            Ok(ExtractedContent { text, metadata })
        }
        Value::Array(elements) => {
            let count = elements.len();
            let mut texts = Vec::with_capacity(count);
            let mut metadata = Map::new();

            for (index, element) in elements.into_iter().enumerate() {
                let Value::Object(mut element) = element else {
                    return Err(ParseError::Decode(format!(
                        "element {} is not an object",
                        index
                    )));
                };
                if let Some(Value::String(text)) = element.remove("text") {
                    if !text.is_empty() {
                        texts.push(text);
                    }
                }
                if index == 0 {
                    metadata = take_metadata(element.remove("metadata"))?;
                }
            }

            metadata.insert("element_count".to_string(), Value::from(count));
            Ok(ExtractedContent {
                text: texts.join("\n\n"),
                metadata,
            })
        }
        other => Err(ParseError::Decode(format!(
            "unexpected response shape: {}",
            other
        ))),
    }
}

fn take_metadata(value: Option<Value>) -> Result<Map<String, Value>, ParseError> {
    match value {
        Some(Value::Object(map)) => Ok(map),
        Some(Value::Null) | None => Ok(Map::new()),
        Some(other) => Err(ParseError::Decode(format!(
            "expected object for metadata, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_object_response() {
        let content = decode_response(json!({
            "text": "Quarterly results",
            "metadata": {"page_count": 3, "author": "Finance"}
        }))
        .unwrap();
        assert_eq!(content.text, "Quarterly results");
        assert_eq!(content.metadata.get("page_count"), Some(&json!(3)));
        assert_eq!(content.metadata.get("author"), Some(&json!("Finance")));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let content = decode_response(json!({})).unwrap();
        assert_eq!(content.text, "");
        assert!(content.metadata.is_empty());

        let content = decode_response(json!({"text": null, "metadata": null})).unwrap();
        assert_eq!(content, ExtractedContent::default());
    }

    #[test]
    fn test_decode_element_list() {
        let content = decode_response(json!([
            {"type": "Title", "text": "Intro", "metadata": {"filetype": "application/pdf", "page_number": 1}},
            {"type": "NarrativeText", "text": "Body text", "metadata": {"page_number": 2}},
            {"type": "PageBreak", "text": ""}
        ]))
        .unwrap();
        assert_eq!(content.text, "Intro\n\nBody text");
        assert_eq!(content.metadata.get("filetype"), Some(&json!("application/pdf")));
        assert_eq!(content.metadata.get("element_count"), Some(&json!(3)));
    }

    #[test]
    fn test_empty_element_list() {
        let content = decode_response(json!([])).unwrap();
        assert_eq!(content.text, "");
        assert_eq!(content.metadata.get("element_count"), Some(&json!(0)));
    }

    #[test]
    fn test_rejects_malformed_payloads() {
        assert!(matches!(
            decode_response(json!("plain string")),
            Err(ParseError::Decode(_))
        ));
        assert!(matches!(
            decode_response(json!({"text": 42})),
            Err(ParseError::Decode(_))
        ));
        assert!(matches!(
            decode_response(json!({"metadata": [1, 2]})),
            Err(ParseError::Decode(_))
        ));
        assert!(matches!(
            decode_response(json!([1])),
            Err(ParseError::Decode(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ExtractRequest {
            url: "s3://docs/documents/a.pdf",
            bucket: Some("docs"),
            key: "documents/a.pdf",
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"url": "s3://docs/documents/a.pdf", "bucket": "docs", "key": "documents/a.pdf"})
        );
    }
}
