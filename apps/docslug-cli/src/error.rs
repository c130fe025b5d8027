//! CLI error types and exit codes

use docslug_core::DocsError;
use thiserror::Error;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: One or more slug updates failed, or output could not be written
/// - 2: Usage or validation error
/// - 3: Network or upstream error
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No API key given.")]
    MissingApiKey,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Output error: {0}")]
    Output(String),

    #[error("{failed} of {attempted} slug updates failed")]
    PartialFailure { failed: usize, attempted: usize },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::PartialFailure { .. } | CliError::Output(_) => 1,
            CliError::MissingApiKey | CliError::Validation(_) => 2,
            CliError::Network(_) | CliError::Api { .. } => 3,
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::MissingApiKey => Some("Pass --api-key or set DOCSLUG_API_KEY."),
            CliError::Network(_) => {
                Some("Check that the gateway is running and --gateway-url points at it.")
            }
            CliError::Api { status: 401, .. } | CliError::Api { status: 403, .. } => {
                Some("Check that the API key belongs to the project you are editing.")
            }
            _ => None,
        }
    }
}

impl From<DocsError> for CliError {
    fn from(err: DocsError) -> Self {
        match err {
            DocsError::MissingCredential => CliError::MissingApiKey,
            DocsError::MissingPayload => CliError::Validation(err.to_string()),
            DocsError::Upstream { status } => CliError::Api {
                status,
                message: err.to_string(),
            },
            DocsError::Transport(message) => CliError::Network(message),
        }
    }
}
