//! Question answering and text analysis, forwarded to the answering engine.

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use docflow_core::models::{QuestionRequest, Sentiment, TextRequest};
use docflow_core::AppError;
use docflow_services::AnswerEngine;
use std::sync::Arc;
use validator::Validate;

fn engine(state: &AppState) -> Result<&Arc<dyn AnswerEngine>, HttpAppError> {
    state.answer_engine.as_ref().ok_or_else(|| {
        HttpAppError(AppError::ServiceUnavailable(
            "Answering engine is not configured".to_string(),
        ))
    })
}

#[utoipa::path(
    post,
    path = "/api/v0/nlp/search",
    tag = "nlp",
    request_body = QuestionRequest,
    responses(
        (status = 200, description = "Answer text", body = String),
        (status = 400, description = "Invalid question", body = ErrorResponse),
        (status = 502, description = "Answering engine failed", body = ErrorResponse),
        (status = 503, description = "Answering engine not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn search(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<QuestionRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;
    let answer = engine(&state)?.answer(&request.question).await?;
    Ok(Json(answer))
}

#[utoipa::path(
    post,
    path = "/api/v0/nlp/sentiment",
    tag = "nlp",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Sentiment label and score", body = Sentiment),
        (status = 400, description = "Invalid text", body = ErrorResponse),
        (status = 502, description = "Answering engine failed", body = ErrorResponse),
        (status = 503, description = "Answering engine not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn sentiment(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<TextRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;
    let sentiment = engine(&state)?.analyze_sentiment(&request.text).await?;
    Ok(Json(sentiment))
}

#[utoipa::path(
    post,
    path = "/api/v0/nlp/entities",
    tag = "nlp",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Named entities found in the text", body = Vec<String>),
        (status = 400, description = "Invalid text", body = ErrorResponse),
        (status = 502, description = "Answering engine failed", body = ErrorResponse),
        (status = 503, description = "Answering engine not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn entities(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<TextRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;
    let entities = engine(&state)?.extract_entities(&request.text).await?;
    Ok(Json(entities))
}
