//! Configuration management for jiracase.
//!
//! Settings are layered: built-in defaults, then the optional TOML file at
//! `<config_dir>/jiracase/config.toml`, then environment variables. Command
//! line flags are applied on top by the binary.
//!
//! ```toml
//! [backend]
//! api_url = "http://localhost:8000"
//! timeout_secs = 120
//! ```

mod settings;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use settings::{BackendSettings, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "JIRACASE_API_URL";

/// Environment variable overriding the request timeout (seconds).
pub const TIMEOUT_ENV: &str = "JIRACASE_TIMEOUT_SECS";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub backend: BackendSettings,
}

impl Config {
    /// Load configuration from the default file and the environment.
    ///
    /// A missing file yields the defaults. The result is not validated yet:
    /// command line flags may still override it, so callers run
    /// [`Config::validate`] once every layer has been applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an
    /// environment override is malformed.
    pub fn load() -> Result<Self> {
        Self::load_with(&Self::config_path()?, |key| std::env::var(key).ok())
    }

    /// Load the file at `path`, then apply environment overrides read
    /// through `lookup`.
    pub fn load_with<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_from(path)?;
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("jiracase").join("config.toml"))
    }

    /// Load configuration from a specific file, without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(api_url = %url, "Backend URL overridden from environment");
            self.backend.api_url = url;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            self.backend.timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    TIMEOUT_ENV, raw
                ))
            })?;
        }

        Ok(())
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<()> {
        self.backend.validate()
    }
}
