//! Test case backend client and types.
//!
//! This module provides the interface for communicating with the backend that
//! fronts the issue tracker and the test case generator.

mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{ConfigStatus, GeneratedTestCases, IssueData, JiraProbe, TestCase, TestSuite};
