//! Logging configuration using the tracing ecosystem.
//!
//! The TUI owns the terminal, so log output goes to a daily-rotated file in
//! the local data directory. One-shot CLI commands can additionally mirror
//! logs to stderr with `--verbose`.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "jiracase=info,warn";

/// Log file name prefix; the appender adds the date.
const LOG_FILE_NAME: &str = "jiracase.log";

/// Initialize the logging system.
///
/// Log level is taken from `RUST_LOG` when set, `jiracase=info,warn`
/// otherwise. Logs live under:
/// - Linux: `~/.local/share/jiracase/logs/`
/// - macOS: `~/Library/Application Support/jiracase/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\jiracase\logs\`
///
/// When `to_stderr` is set, the same events are also written to stderr.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already installed.
pub fn init(to_stderr: bool) -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("jiracase").join("logs"))
}

/// Where logs are stored, for display to users.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("jiracase shutting down");
}
