use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::jobs::JobError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": "<message>"}`; the popup shows that
/// message verbatim, so internal details only go to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid Ashby URL")]
    InvalidUrl,

    #[error("Failed to fetch job board: {0}")]
    UpstreamUnavailable(String),

    #[error("Job posting not found")]
    NotFound,

    #[error("No posting provided")]
    MissingInput,

    #[error("Prediction failed: {0}")]
    PredictionFailed(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JobError> for AppError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::InvalidUrl => AppError::InvalidUrl,
            JobError::UpstreamUnavailable { status } => {
                AppError::UpstreamUnavailable(format!("upstream returned {status}"))
            }
            JobError::NotFound { .. } => AppError::NotFound,
            JobError::Http(e) => AppError::Internal(e.to_string()),
            JobError::Parse(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidUrl => (StatusCode::BAD_REQUEST, "Invalid Ashby URL".to_string()),
            AppError::UpstreamUnavailable(detail) => {
                tracing::warn!("Job board unavailable: {detail}");
                (StatusCode::BAD_GATEWAY, "Failed to fetch job board".to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Job posting not found".to_string()),
            AppError::MissingInput => {
                (StatusCode::BAD_REQUEST, "No posting provided".to_string())
            }
            AppError::PredictionFailed(e) => {
                tracing::error!("Predict error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed".to_string())
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch job posting".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
