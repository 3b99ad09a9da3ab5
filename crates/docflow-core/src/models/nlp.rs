use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Question forwarded to the answering engine
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct QuestionRequest {
    #[validate(length(
        min = 5,
        max = 255,
        message = "Question must be between 5 and 255 characters"
    ))]
    pub question: String,
}

/// Text snippet for sentiment analysis or entity extraction
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct TextRequest {
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Text must be between 1 and 10000 characters"
    ))]
    pub text: String,
}

/// Sentiment label and confidence, as returned by the answering engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sentiment {
    pub label: String,
    pub score: f64,
}
