//! Error types for the JSON API
//!
//! Every request-scoped failure is reported to the caller; none of them
//! affect the running process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::inference::ScreenError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable posting text (400)
    #[error("{0}")]
    EmptyInput(String),

    /// Model or vectorizer missing or unreadable (503)
    #[error("{0}")]
    ArtifactUnavailable(String),

    /// Vectorization or classification failed (500)
    #[error("{0}")]
    PredictionFailed(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ScreenError> for ApiError {
    fn from(err: ScreenError) -> Self {
        match err {
            ScreenError::Artifact(e) => ApiError::ArtifactUnavailable(e.to_string()),
            e @ ScreenError::Inference(_) => ApiError::PredictionFailed(e.to_string()),
            ScreenError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            ApiError::EmptyInput(_) => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
            ApiError::ArtifactUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "ARTIFACT_UNAVAILABLE")
            }
            ApiError::PredictionFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PREDICTION_FAILED")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
