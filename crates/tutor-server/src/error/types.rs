//! API error types.

use axum::http::StatusCode;
use std::collections::HashMap;
use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not valid JSON (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body has the wrong shape or breaks a field rule (422). Maps field
    /// name to messages.
    #[error("Validation failed")]
    ValidationError(HashMap<String, Vec<String>>),

    /// No route matched (404).
    #[error("{0} not found")]
    NotFound(String),

    /// Unexpected failure while running goal classification or roadmap
    /// generation (500).
    #[error("error while {operation}: {message}")]
    Processing {
        /// What the server was doing, e.g. "structuring goals".
        operation: &'static str,
        /// Failure text.
        message: String,
    },
}

impl ApiError {
    /// Processing failure for `operation` (e.g. "structuring goals").
    pub fn processing(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Processing {
            operation,
            message: message.into(),
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Processing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::ValidationError(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Processing { .. } => "processing_error",
        }
    }

    /// Check if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::ValidationError(HashMap::new()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::NotFound("Route".into()).status_code(), StatusCode::NOT_FOUND);
        assert!(ApiError::processing("structuring goals", "boom").is_server_error());
        assert!(!ApiError::NotFound("Route".into()).is_server_error());
    }

    #[test]
    fn test_processing_message_embeds_cause() {
        let err = ApiError::processing("generating roadmap", "index out of bounds");
        assert_eq!(err.to_string(), "error while generating roadmap: index out of bounds");
        assert_eq!(err.error_code(), "processing_error");
    }
}
