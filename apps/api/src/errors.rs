use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::documents::extract::ExtractionError;
use crate::generation::composer::ComposeError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Cannot compose prompt: {0}")]
    MissingRequiredFact(#[from] ComposeError),

    /// A required collaborator (the language model) failed. Carries its raw message.
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::CollaboratorUnavailable(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                e.to_string(),
            ),
            AppError::MissingRequiredFact(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_REQUIRED_FACT",
                e.to_string(),
            ),
            AppError::CollaboratorUnavailable(msg) => {
                tracing::error!("Collaborator error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "COLLABORATOR_UNAVAILABLE",
                    msg.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
