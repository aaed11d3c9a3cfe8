use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::generation::generator::ParseFailure;
use crate::matching::MatchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Required input missing or a collaborator not initialized yet.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] ParseFailure),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MatchError> for AppError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::Precondition(msg) => AppError::Precondition(msg),
            MatchError::ProviderUnavailable(msg) => AppError::ProviderUnavailable(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Precondition(msg) => (
                StatusCode::PRECONDITION_FAILED,
                "PRECONDITION_FAILED",
                msg.clone(),
            ),
            AppError::ProviderUnavailable(msg) => {
                tracing::error!("Provider unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PROVIDER_UNAVAILABLE",
                    msg.clone(),
                )
            }
            AppError::MalformedResponse(e) => {
                tracing::error!(
                    "Malformed generation response ({}): {}",
                    e.reason,
                    e.raw_content
                );
                (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", e.to_string())
            }
            AppError::Extraction(e @ ExtractionError::Worker(_)) => {
                tracing::error!("Extraction worker error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PROVIDER_UNAVAILABLE",
                    "Text extraction is unavailable".to_string(),
                )
            }
            AppError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILED",
                e.to_string(),
            ),
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
