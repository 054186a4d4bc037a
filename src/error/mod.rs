// Error types for vision-ask

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Image encoding failed: {0}")]
    Encoding(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API key not found. Please set the {0} environment variable.")]
    MissingCredential(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Broad failure classes a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Encoding,
    Network,
    MalformedResponse,
    MissingCredential,
    Internal,
}

impl VisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VisionError::Validation(_) => ErrorKind::Validation,
            VisionError::Encoding(_) => ErrorKind::Encoding,
            VisionError::Network(_) => ErrorKind::Network,
            VisionError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            VisionError::MissingCredential(_) => ErrorKind::MissingCredential,
            VisionError::Config(_) | VisionError::Io(_) | VisionError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }
}

impl ErrorKind {
    /// Stable label used in JSON error bodies and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::Encoding => "encoding_error",
            ErrorKind::Network => "network_error",
            ErrorKind::MalformedResponse => "malformed_response_error",
            ErrorKind::MissingCredential => "missing_credential_error",
            ErrorKind::Internal => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Encoding => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Network | ErrorKind::MalformedResponse => StatusCode::BAD_GATEWAY,
            ErrorKind::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for VisionError {
    fn from(err: config::ConfigError) -> Self {
        VisionError::Config(err.to_string())
    }
}

// Convert VisionError to HTTP responses for Axum
impl IntoResponse for VisionError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        let body = json!({
            "type": "error",
            "error": {
                "type": kind.as_str(),
                "message": self.to_string(),
            }
        });

        (kind.status_code(), axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, VisionError>;
