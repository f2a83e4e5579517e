//! Centralized error types for jiracase.
//!
//! `AppError` aggregates the layer errors (`ApiError`, `ConfigError`) with the
//! failures that only the front ends hit: terminal setup, file export and
//! rejected issue URLs. All error types use `thiserror`.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Backend errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of exported data failed.
    #[error("Failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The supplied value is not a Jira issue URL.
    #[error("Invalid Jira issue URL: {0}")]
    InvalidIssueUrl(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// Backend failures already carry the message the user should see, so
    /// they pass through unchanged. Local failures get a hint on what to check.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError { .. } => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(ApiError::Network(_)) => {
                "Could not reach the backend. Is it running?".to_string()
            }
            AppError::Api(e) => e.to_string(),
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Serialize(_) => "Could not encode the test suite as JSON.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::InvalidIssueUrl(_) => crate::validator::INVALID_URL_HINT.to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidIssueUrl(_) | AppError::Config(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
