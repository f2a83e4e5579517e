//! Backend connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Request timeout in seconds, sized for AI generation latency.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the backend (e.g., "http://localhost:8000").
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendSettings {
    /// The request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the URL is empty or not
    /// http(s), or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend api_url cannot be empty".to_string(),
            ));
        }

        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "backend api_url '{}' must start with http:// or https://",
                self.api_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "backend timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
