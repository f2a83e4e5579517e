//! API error types for the backend client.
//!
//! Every failure is normalized so that `to_string()` yields the message a user
//! should see: the server-provided detail when there is one, otherwise the raw
//! transport message.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Http {
        /// The HTTP status code.
        status: StatusCode,
        /// Server detail, or a generic status message.
        message: String,
    },

    /// The request did not complete within the client timeout.
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    /// Connection-level failure (DNS, refused connection, broken body).
    #[error("{0}")]
    Network(#[source] reqwest::Error),

    /// The transport succeeded but the payload carries an `error` field.
    #[error("{0}")]
    Rejected(String),

    /// The payload did not match the expected schema.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The configured backend address is unusable.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// The background task running the request died before reporting.
    #[error("Request task failed: {0}")]
    TaskFailed(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Build an error for a non-2xx response, preferring the server detail.
    ///
    /// The backend reports failures as `{"detail": "..."}`, or for request
    /// validation as `{"detail": [{"msg": "..."}, ...]}`.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = server_detail(body)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        ApiError::Http { status, message }
    }

    /// Classify a reqwest failure, splitting out timeouts.
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout)
        } else {
            ApiError::Network(err)
        }
    }

    /// Whether the failure happened at or below the HTTP boundary.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Http { .. } | ApiError::Timeout(_) | ApiError::Network(_)
        )
    }

    /// The HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(err) => err.status(),
            _ => None,
        }
    }
}

fn server_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("detail")? {
        Value::String(detail) if !detail.is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}
