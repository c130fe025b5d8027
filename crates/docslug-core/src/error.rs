//! Error taxonomy shared by every docs operation.

use thiserror::Error;

/// Failure of a single docs operation.
///
/// The gateway and the engine report the same variants no matter which
/// operation failed, so callers can handle failures uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocsError {
    /// The caller did not supply an API key.
    #[error("Missing API key")]
    MissingCredential,

    /// An update was requested without a new slug.
    #[error("Missing new slug in request body")]
    MissingPayload,

    /// The remote system answered with a non-success status.
    #[error("Upstream returned status {status}")]
    Upstream { status: u16 },

    /// The remote system could not be reached or sent an unreadable body.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl DocsError {
    /// Stable machine-readable code used in JSON error bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            DocsError::MissingCredential => "MISSING_API_KEY",
            DocsError::MissingPayload => "MISSING_SLUG",
            DocsError::Upstream { .. } => "UPSTREAM_ERROR",
            DocsError::Transport(_) => "TRANSPORT_ERROR",
        }
    }

    /// HTTP status a gateway answers with for this error.
    ///
    /// Upstream statuses are forwarded verbatim.
    pub fn http_status(&self) -> u16 {
        match self {
            DocsError::MissingCredential | DocsError::MissingPayload => 400,
            DocsError::Upstream { status } => *status,
            DocsError::Transport(_) => 500,
        }
    }

    /// Rebuild an error from a gateway error response.
    ///
    /// Used by HTTP clients of the gateway so that they surface the same
    /// variant the gateway produced.
    pub fn from_response(status: u16, code: Option<&str>, message: Option<&str>) -> Self {
        match (status, code) {
            (400, Some("MISSING_API_KEY")) => DocsError::MissingCredential,
            (400, Some("MISSING_SLUG")) => DocsError::MissingPayload,
            (500, Some("TRANSPORT_ERROR")) => {
                let message = message.unwrap_or("upstream unreachable");
                let detail = message.strip_prefix("Transport error: ").unwrap_or(message);
                DocsError::Transport(detail.to_string())
            }
            _ => DocsError::Upstream { status },
        }
    }
}

/// Result type alias for docs operations.
pub type DocsResult<T> = Result<T, DocsError>;
