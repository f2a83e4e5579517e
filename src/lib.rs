//! jiracase - turn Jira issues into test cases from the terminal
//!
//! A client for the test case generation backend: it checks the backend's
//! health and Jira/AI readiness, parses a Jira issue URL into issue metadata,
//! and requests a generated test suite for it. The same workflow drives both
//! the terminal UI and the one-shot subcommands.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod logging;
pub mod tasks;
pub mod ui;
pub mod validator;
pub mod workflow;

pub use error::{AppError, Result};
