// src/error.rs
// Error types shared by the carousel, extractor, finder and stores

use serde::Serialize;
use thiserror::Error;

/// A single field-level problem found while validating a submitted fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Main error type for the factdeck library
#[derive(Error, Debug)]
pub enum FactError {
    #[error("validation failed: {}", describe(.0))]
    Validation(Vec<FieldViolation>),

    #[error("no results: {0}")]
    NoResults(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("input rejected: {0}")]
    InputRejected(String),

    #[error("a search is already in progress")]
    Busy,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("carousel needs at least one fact")]
    EmptyRotation,

    #[error("carousel is no longer running")]
    Stopped,
}

/// Convenience type alias for Result using FactError
pub type Result<T> = std::result::Result<T, FactError>;

impl FactError {
    /// Text for the transient notification shown to the user.
    ///
    /// Network failures collapse to a generic message; the others carry
    /// their own explanation.
    pub fn user_message(&self) -> String {
        match self {
            FactError::Network(_) => "Failed to fetch fact from Wikipedia".to_string(),
            FactError::NoResults(reason) => reason.clone(),
            FactError::InputRejected(reason) => reason.clone(),
            FactError::Busy => "Please wait for the current search to finish".to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the failure happened before any remote call was made
    pub fn is_local(&self) -> bool {
        matches!(self, FactError::InputRejected(_) | FactError::Busy)
    }
}

impl From<reqwest::Error> for FactError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FactError::Network("request timed out".to_string())
        } else {
            FactError::Network(err.to_string())
        }
    }
}

impl From<sqlx::Error> for FactError {
    fn from(err: sqlx::Error) -> Self {
        FactError::Storage(err.to_string())
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}
