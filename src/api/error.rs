// src/api/error.rs
// Error responses for the HTTP API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::error::{FactError, FieldViolation};

/// Standard API error response format
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
    pub violations: Vec<FieldViolation>,
}

impl ApiError {
    /// Create a new internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: Some("INTERNAL_ERROR".to_string()),
            violations: Vec::new(),
        }
    }

    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: Some("BAD_REQUEST".to_string()),
            violations: Vec::new(),
        }
    }

    /// Bad request carrying the field-level violation list
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self {
            message: "Invalid fact payload".to_string(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: Some("VALIDATION_ERROR".to_string()),
            violations,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }

        if !self.violations.is_empty() {
            response_json["violations"] = json!(self.violations);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

impl From<FactError> for ApiError {
    fn from(err: FactError) -> Self {
        match err {
            FactError::Validation(violations) => ApiError::validation(violations),
            FactError::InputRejected(message) => ApiError::bad_request(message),
            other => {
                error!("Request failed: {}", other);
                ApiError::internal("Internal server error")
            }
        }
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
