//! Error types for QnA Core
//!
//! Every procedure fails with a [`ProcedureError`]. Validation failures are
//! raised before the store is touched; not-found failures abort the procedure
//! without side effects.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for procedure calls
pub type Result<T> = std::result::Result<T, ProcedureError>;

/// Main error type for procedure calls
#[derive(Error, Debug)]
pub enum ProcedureError {
    /// Input failed one or more schema rules
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced question or answer does not exist
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The requested procedure name is not part of the router
    #[error("No procedure found on path \"{0}\"")]
    UnknownProcedure(String),

    /// Output could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProcedureError {
    /// Wire-level error code, in the vocabulary RPC clients switch on
    pub fn code(&self) -> ErrorCode {
        match self {
            ProcedureError::Validation(_) => ErrorCode::BadRequest,
            ProcedureError::NotFound(_) | ProcedureError::UnknownProcedure(_) => {
                ErrorCode::NotFound
            }
            ProcedureError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }

    /// Field issues, when the failure came from validation
    pub fn issues(&self) -> &[Issue] {
        match self {
            ProcedureError::Validation(e) => &e.issues,
            _ => &[],
        }
    }
}

/// Error codes shared by the server and its clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    MethodNotSupported,
    InternalServerError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::BadRequest => write!(f, "BAD_REQUEST"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::MethodNotSupported => write!(f, "METHOD_NOT_SUPPORTED"),
            ErrorCode::InternalServerError => write!(f, "INTERNAL_SERVER_ERROR"),
        }
    }
}

/// A single rule violation on a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct Issue {
    pub field: String,
    pub message: String,
}

impl Issue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Structured validation failure listing every violated rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

impl ValidationError {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// First message reported for `field`, if any
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.issues
            .iter()
            .find(|i| i.field == field)
            .map(|i| i.message.as_str())
    }
}

fn format_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Referenced record is absent from the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("Post not found")]
    Question(String),

    #[error("Answer not found")]
    Answer {
        question_id: String,
        answer_id: String,
    },
}
