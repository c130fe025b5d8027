//! Gateway error types and HTTP response handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docslug_core::DocsError;
use serde::Serialize;
use thiserror::Error;

/// Gateway errors with structured responses.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A docs operation failed; carries the shared taxonomy unchanged.
    #[error(transparent)]
    Docs(#[from] DocsError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Structured error response returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl GatewayError {
    /// Get the error code string for the response.
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Docs(e) => e.error_code(),
            GatewayError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Upstream statuses pass through verbatim; a status the `http` crate
    /// cannot represent degrades to 502.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Docs(e) => {
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
