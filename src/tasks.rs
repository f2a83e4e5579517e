//! Async task management for non-blocking API operations.
//!
//! Every backend call runs in its own tokio task and reports back through an
//! unbounded channel, so the owner of the workflow state never blocks on the
//! network and independent calls complete in whatever order they finish.
//!
//! # Architecture
//!
//! 1. The controller records the start of an action on its state
//! 2. It asks `TaskSpawner` to run the matching backend call
//! 3. The event loop keeps rendering and handling input
//! 4. When the call finishes, the task sends an `ApiMessage` through the channel
//! 5. The loop polls the channel with `try_recv()` and hands the message back
//!    to the controller
//!
//! A call that panics still produces a message (`ApiError::TaskFailed`), so an
//! in-flight action always settles.

use std::future::Future;

use tokio::sync::mpsc;
use tracing::error;

use crate::api::types::{ConfigStatus, GeneratedTestCases, IssueData};
use crate::api::{ApiClient, ApiError};

/// Messages sent from background tasks to the owner of the workflow state.
#[derive(Debug)]
pub enum ApiMessage {
    /// Backend liveness result.
    HealthChecked(Result<(), ApiError>),

    /// Backend readiness fetched (startup or refresh).
    ConfigLoaded(Result<ConfigStatus, ApiError>),

    /// Issue metadata fetched, with or without a custom token.
    IssueParsed(Result<IssueData, ApiError>),

    /// Test suite generated together with its issue context.
    TestCasesGenerated(Result<GeneratedTestCases, ApiError>),
}

/// Spawns background tasks for backend calls.
#[derive(Debug, Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Create a spawner together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ApiMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Spawn a backend liveness check.
    pub fn spawn_health_check(&self, client: &ApiClient) {
        let client = client.clone();
        self.spawn_guarded(
            async move { client.health_check().await },
            ApiMessage::HealthChecked,
        );
    }

    /// Spawn a backend readiness fetch.
    pub fn spawn_load_config(&self, client: &ApiClient) {
        let client = client.clone();
        self.spawn_guarded(
            async move { client.get_config().await },
            ApiMessage::ConfigLoaded,
        );
    }

    /// Spawn an issue fetch.
    ///
    /// Uses the caller's token when one is given, the backend's own
    /// credentials otherwise.
    pub fn spawn_parse_issue(&self, client: &ApiClient, url: String, auth_token: Option<String>) {
        let client = client.clone();
        self.spawn_guarded(
            async move {
                match auth_token {
                    Some(token) => client.parse_issue_with_auth(&url, &token).await,
                    None => client.parse_issue(&url).await,
                }
            },
            ApiMessage::IssueParsed,
        );
    }

    /// Spawn test case generation for an issue.
    pub fn spawn_generate_test_cases(&self, client: &ApiClient, url: String) {
        let client = client.clone();
        self.spawn_guarded(
            async move { client.generate_test_cases(&url).await },
            ApiMessage::TestCasesGenerated,
        );
    }

    /// Run `call` in its own task and always deliver exactly one message.
    fn spawn_guarded<T, F, W>(&self, call: F, wrap: W)
    where
        T: Send + 'static,
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
        W: FnOnce(Result<T, ApiError>) -> ApiMessage + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match tokio::spawn(call).await {
                Ok(result) => result,
                Err(join_error) => {
                    error!(error = %join_error, "Background request task failed");
                    Err(ApiError::TaskFailed(join_error.to_string()))
                }
            };
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(wrap(result));
        });
    }
}
