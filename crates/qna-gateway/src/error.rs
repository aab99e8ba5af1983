//! Error types for the Gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use qna_core::{ErrorCode, Issue, ProcedureError};
use thiserror::Error;

use crate::rpc::RpcFailure;

/// Gateway error type
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A procedure rejected the call locally
    #[error(transparent)]
    Procedure(#[from] ProcedureError),

    /// A remote gateway answered with an error envelope
    #[error("{message}")]
    Rpc {
        code: ErrorCode,
        message: String,
        issues: Vec<Issue>,
    },

    #[error("Unsupported GET-request to mutation procedure at path \"{0}\"")]
    MethodNotSupported(String),

    #[error("Invalid input: {0}")]
    BadInput(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// RPC error code reported to clients
    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Procedure(e) => e.code(),
            GatewayError::Rpc { code, .. } => *code,
            GatewayError::MethodNotSupported(_) => ErrorCode::MethodNotSupported,
            GatewayError::BadInput(_) => ErrorCode::BadRequest,
            _ => ErrorCode::InternalServerError,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        match self {
            GatewayError::Procedure(e) => e.issues(),
            GatewayError::Rpc { issues, .. } => issues,
            _ => &[],
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == ErrorCode::NotFound
    }
}

/// HTTP status for an RPC error code
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::MethodNotSupported => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let code = self.code();
        if code == ErrorCode::InternalServerError {
            tracing::error!("RPC call failed: {}", self);
        }
        let body = RpcFailure::new(code, self.to_string(), self.issues().to_vec());
        (status_for(code), Json(body)).into_response()
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Http(e.to_string())
    }
}

/// Result type for Gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
