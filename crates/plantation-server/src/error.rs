//! Request-level errors and their JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use plantation_core::ValidationError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid estate ID format")]
    InvalidIdentifier,
    #[error("{0}")]
    InvalidParameter(String),
    #[error("Estate not found")]
    NotFound,
    /// Data provider failure. The message is safe to show; the cause is only logged.
    #[error("{0}")]
    UpstreamFailure(String),
    #[error("Flight plan computation timed out")]
    Timeout,
}

impl ApiError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Log the provider error and hide it behind `message`.
    pub fn upstream(message: &str, err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "{}", message);
        Self::UpstreamFailure(message.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier | Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidIdentifier.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::UpstreamFailure("Database error".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Timeout.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_error_becomes_bad_request() {
        let err = ApiError::from(ValidationError::OutOfBounds);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Tree coordinates out of bounds");
    }
}
