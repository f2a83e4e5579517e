//! The workflow controller.
//!
//! Owns the `WorkflowState` and sequences every backend interaction. Each
//! action exists in two forms built on the same transitions: `begin_*` plus
//! `handle_message` for the event loop, and an awaitable form for the CLI.

use tracing::{debug, info, instrument, warn};

use super::state::{Action, WorkflowState};
use crate::api::types::JiraProbe;
use crate::api::{ApiClient, ApiError};
use crate::tasks::{ApiMessage, TaskSpawner};

/// Drives the issue-to-test-cases workflow.
#[derive(Debug)]
pub struct WorkflowController {
    client: ApiClient,
    spawner: TaskSpawner,
    state: WorkflowState,
}

impl WorkflowController {
    /// Create a controller whose background results arrive on `spawner`'s channel.
    pub fn new(client: ApiClient, spawner: TaskSpawner) -> Self {
        Self {
            client,
            spawner,
            state: WorkflowState::new(),
        }
    }

    /// Current state snapshot for the views.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// The backend client in use.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fire the startup checks as two independent tasks.
    pub fn start(&self) {
        info!(base_url = %self.client.base_url(), "Running startup checks");
        self.spawner.spawn_health_check(&self.client);
        self.spawner.spawn_load_config(&self.client);
    }

    /// Re-fetch backend readiness. The result replaces the old value wholesale.
    pub fn refresh_config(&self) {
        debug!("Refreshing backend configuration");
        self.spawner.spawn_load_config(&self.client);
    }

    /// Start a parse. A blank `auth_token` means the backend's own credentials.
    ///
    /// Callers must only dispatch when [`WorkflowState::can_dispatch`] holds.
    pub fn begin_parse(&mut self, url: &str, auth_token: Option<&str>) {
        Self::begin_parse_on(&mut self.state, &self.spawner, &self.client, url, auth_token);
    }

    /// Start test case generation.
    ///
    /// Callers must only dispatch when [`WorkflowState::can_dispatch`] holds.
    pub fn begin_generate(&mut self, url: &str) {
        Self::begin_generate_on(&mut self.state, &self.spawner, &self.client, url);
    }

    /// Apply a background result to the state.
    pub fn handle_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::HealthChecked(result) => self.state.apply_health(&result),
            ApiMessage::ConfigLoaded(result) => self.state.apply_config(result),
            ApiMessage::IssueParsed(result) => self.state.settle_parse(result),
            ApiMessage::TestCasesGenerated(result) => self.state.settle_generate(result),
        }
    }

    /// Clear the outcome messages.
    pub fn dismiss_messages(&mut self) {
        self.state.dismiss_messages();
    }

    /// Run the startup checks and wait for both to report.
    pub async fn startup(&mut self) {
        let (spawner, rx) = TaskSpawner::channel();
        spawner.spawn_health_check(&self.client);
        spawner.spawn_load_config(&self.client);
        self.drain(spawner, rx).await;
    }

    /// Parse an issue and wait for the outcome.
    pub async fn parse_issue(&mut self, url: &str, auth_token: Option<&str>) {
        let (spawner, rx) = TaskSpawner::channel();
        Self::begin_parse_on(&mut self.state, &spawner, &self.client, url, auth_token);
        self.drain(spawner, rx).await;
    }

    /// Generate test cases and wait for the outcome.
    pub async fn generate_test_cases(&mut self, url: &str) {
        let (spawner, rx) = TaskSpawner::channel();
        Self::begin_generate_on(&mut self.state, &spawner, &self.client, url);
        self.drain(spawner, rx).await;
    }

    /// Ask the backend to probe its tracker credentials.
    ///
    /// Diagnostic only: the workflow state is left untouched.
    #[instrument(skip(self))]
    pub async fn probe_jira(&self) -> Result<JiraProbe, ApiError> {
        let probe = self.client.test_connection().await;
        if let Err(e) = &probe {
            warn!(error = %e, "Jira probe failed");
        }
        probe
    }

    fn begin_parse_on(
        state: &mut WorkflowState,
        spawner: &TaskSpawner,
        client: &ApiClient,
        url: &str,
        auth_token: Option<&str>,
    ) {
        debug_assert!(state.can_dispatch(url), "parse dispatched while not allowed");
        let auth_token = auth_token
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        state.begin(Action::Parse);
        spawner.spawn_parse_issue(client, url.to_string(), auth_token);
    }

    fn begin_generate_on(
        state: &mut WorkflowState,
        spawner: &TaskSpawner,
        client: &ApiClient,
        url: &str,
    ) {
        debug_assert!(state.can_dispatch(url), "generate dispatched while not allowed");
        state.begin(Action::Generate);
        spawner.spawn_generate_test_cases(client, url.to_string());
    }

    /// Apply results in arrival order until every spawned task has reported.
    async fn drain(
        &mut self,
        spawner: TaskSpawner,
        mut rx: tokio::sync::mpsc::UnboundedReceiver<ApiMessage>,
    ) {
        drop(spawner);
        while let Some(message) = rx.recv().await {
            self.handle_message(message);
        }
    }
}
