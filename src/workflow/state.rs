//! The workflow's single source of UI-relevant state.
//!
//! `WorkflowState` is a composite of independent axes rather than a small
//! enum: backend reachability, backend readiness, the in-flight flag, the
//! last outcome message, and the active issue and test suite. Views only read
//! it; every change goes through the transition methods below, which keep
//! these invariants:
//!
//! - starting a parse or generate clears the issue, the suite and both
//!   outcome messages;
//! - a test suite is only ever present together with its issue;
//! - `error` and `success` are never set at the same time;
//! - settling an action always clears `loading`.

use tracing::{debug, info, warn};

use crate::api::types::{ConfigStatus, GeneratedTestCases, IssueData, TestSuite};
use crate::api::ApiError;
use crate::validator::is_valid_issue_url;

/// Shown after a successful parse.
pub const PARSE_SUCCESS_MESSAGE: &str = "Jira issue parsed successfully!";

/// Shown after a successful generation.
pub const GENERATE_SUCCESS_MESSAGE: &str = "Test cases generated successfully!";

/// Shown when backend readiness cannot be fetched.
pub const CONFIG_LOAD_FAILED_MESSAGE: &str = "Failed to load API configuration";

/// A user-triggered action that talks to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fetch issue metadata.
    Parse,
    /// Generate a test suite for the issue.
    Generate,
}

impl Action {
    /// Progress text for the loading indicator.
    pub fn progress_message(&self) -> &'static str {
        match self {
            Action::Parse => "Parsing Jira issue...",
            Action::Generate => "Generating test cases...",
        }
    }
}

/// The controller's aggregate state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    api_reachable: bool,
    config: Option<ConfigStatus>,
    loading: bool,
    pending: Option<Action>,
    error: Option<String>,
    success: Option<String>,
    issue: Option<IssueData>,
    test_suite: Option<TestSuite>,
}

impl WorkflowState {
    /// Create the initial state: nothing known, nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last health check succeeded.
    pub fn api_reachable(&self) -> bool {
        self.api_reachable
    }

    /// The most recently fetched backend readiness.
    pub fn config(&self) -> Option<&ConfigStatus> {
        self.config.as_ref()
    }

    /// Whether a parse or generate request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The action currently in flight, if any.
    pub fn pending_action(&self) -> Option<Action> {
        self.pending
    }

    /// The current error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current success message.
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// The active issue.
    pub fn issue(&self) -> Option<&IssueData> {
        self.issue.as_ref()
    }

    /// The active test suite.
    pub fn test_suite(&self) -> Option<&TestSuite> {
        self.test_suite.as_ref()
    }

    /// Whether an action may be dispatched for `url` right now.
    ///
    /// This is the front-end contract: the URL must pass validation and no
    /// request may be in flight.
    pub fn can_dispatch(&self, url: &str) -> bool {
        !self.loading && is_valid_issue_url(url)
    }

    /// Record the health check outcome. Failures are silent apart from the flag.
    pub fn apply_health(&mut self, result: &Result<(), ApiError>) {
        match result {
            Ok(()) => {
                debug!("Backend is reachable");
                self.api_reachable = true;
            }
            Err(e) => {
                warn!(error = %e, "API Health Check Failed");
                self.api_reachable = false;
            }
        }
    }

    /// Record a readiness fetch. A failure keeps any previous readiness and
    /// leaves `api_reachable` untouched.
    pub fn apply_config(&mut self, result: Result<ConfigStatus, ApiError>) {
        match result {
            Ok(config) => {
                debug!(ready = config.is_ready(), "Loaded backend configuration");
                self.config = Some(config);
            }
            Err(e) => {
                warn!(error = %e, "Failed to load configuration");
                self.fail(CONFIG_LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Enter the in-flight state for `action`, discarding prior results.
    pub fn begin(&mut self, action: Action) {
        info!(?action, "Starting request");
        self.loading = true;
        self.pending = Some(action);
        self.error = None;
        self.success = None;
        self.issue = None;
        self.test_suite = None;
    }

    /// Settle a parse request.
    pub fn settle_parse(&mut self, result: Result<IssueData, ApiError>) {
        match result {
            Ok(issue) => {
                info!(issue_key = %issue.issue_key, "Parsed issue");
                self.issue = Some(issue);
                self.succeed(PARSE_SUCCESS_MESSAGE);
            }
            Err(e) => self.fail(e.to_string()),
        }
        self.finish();
    }

    /// Settle a generate request. Success installs the issue and its suite
    /// from the same payload.
    pub fn settle_generate(&mut self, result: Result<GeneratedTestCases, ApiError>) {
        match result {
            Ok(generated) => {
                info!(
                    issue_key = %generated.issue.issue_key,
                    test_cases = generated.test_suite.test_cases.len(),
                    "Generated test cases"
                );
                self.issue = Some(generated.issue);
                self.test_suite = Some(generated.test_suite);
                self.succeed(GENERATE_SUCCESS_MESSAGE);
            }
            Err(e) => self.fail(e.to_string()),
        }
        self.finish();
    }

    /// Clear both outcome messages.
    pub fn dismiss_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    fn succeed(&mut self, message: &str) {
        self.error = None;
        self.success = Some(message.to_string());
    }

    fn fail(&mut self, message: String) {
        warn!(error = %message, "Action failed");
        self.success = None;
        self.error = Some(message);
    }

    fn finish(&mut self) {
        self.loading = false;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn issue(key: &str) -> IssueData {
        IssueData {
            issue_key: key.to_string(),
            title: "Checkout total is wrong".to_string(),
            status: "To Do".to_string(),
            priority: "High".to_string(),
            reporter: "Dana".to_string(),
            ..Default::default()
        }
    }

    fn generated(key: &str) -> GeneratedTestCases {
        GeneratedTestCases {
            issue: issue(key),
            test_suite: TestSuite {
                suite_name: "Checkout".to_string(),
                total_test_cases: 0,
                ..Default::default()
            },
        }
    }

    fn assert_settled(state: &WorkflowState) {
        assert!(!state.is_loading());
        assert_eq!(state.pending_action(), None);
        assert!(!(state.error().is_some() && state.success().is_some()));
        if state.test_suite().is_some() {
            assert!(state.issue().is_some());
        }
    }

    #[test]
    fn test_initial_state() {
        let state = WorkflowState::new();
        assert!(!state.api_reachable());
        assert!(state.config().is_none());
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert!(state.success().is_none());
    }

    #[test]
    fn test_health_failure_is_silent() {
        let mut state = WorkflowState::new();
        state.apply_health(&Ok(()));
        assert!(state.api_reachable());

        state.apply_health(&Err(ApiError::Rejected("down".to_string())));
        assert!(!state.api_reachable());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_config_failure_sets_error_and_keeps_reachability() {
        let mut state = WorkflowState::new();
        state.apply_health(&Ok(()));
        state.apply_config(Err(ApiError::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "",
        )));

        assert!(state.api_reachable());
        assert!(state.config().is_none());
        assert_eq!(state.error(), Some(CONFIG_LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn test_begin_clears_previous_results() {
        let mut state = WorkflowState::new();
        state.begin(Action::Generate);
        state.settle_generate(Ok(generated("PROJ-1")));
        assert!(state.test_suite().is_some());
        assert!(state.success().is_some());

        state.begin(Action::Parse);
        assert!(state.is_loading());
        assert_eq!(state.pending_action(), Some(Action::Parse));
        assert!(state.issue().is_none());
        assert!(state.test_suite().is_none());
        assert!(state.success().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_parse_success_replaces_issue_and_drops_suite() {
        let mut state = WorkflowState::new();
        state.begin(Action::Generate);
        state.settle_generate(Ok(generated("PROJ-1")));

        state.begin(Action::Parse);
        state.settle_parse(Ok(issue("PROJ-2")));

        assert_settled(&state);
        assert_eq!(state.issue().unwrap().issue_key, "PROJ-2");
        assert!(state.test_suite().is_none());
        assert_eq!(state.success(), Some(PARSE_SUCCESS_MESSAGE));
    }

    #[test]
    fn test_generate_success_sets_issue_and_suite() {
        let mut state = WorkflowState::new();
        state.begin(Action::Generate);
        state.settle_generate(Ok(generated("PROJ-3")));

        assert_settled(&state);
        assert_eq!(state.issue().unwrap().issue_key, "PROJ-3");
        assert_eq!(state.test_suite().unwrap().suite_name, "Checkout");
        assert_eq!(state.success(), Some(GENERATE_SUCCESS_MESSAGE));
    }

    #[test]
    fn test_rejected_payload_sets_error_only() {
        let mut state = WorkflowState::new();
        state.begin(Action::Parse);
        state.settle_parse(Err(ApiError::Rejected("issue not found".to_string())));

        assert_settled(&state);
        assert_eq!(state.error(), Some("issue not found"));
        assert!(state.issue().is_none());
        assert!(state.success().is_none());
    }

    #[test]
    fn test_failure_after_success_never_leaves_both_messages() {
        let mut state = WorkflowState::new();
        state.begin(Action::Parse);
        state.settle_parse(Ok(issue("PROJ-4")));

        state.apply_config(Err(ApiError::Rejected("nope".to_string())));
        assert_eq!(state.error(), Some(CONFIG_LOAD_FAILED_MESSAGE));
        assert!(state.success().is_none());
    }

    #[test]
    fn test_task_failure_still_clears_loading() {
        let mut state = WorkflowState::new();
        state.begin(Action::Generate);
        state.settle_generate(Err(ApiError::TaskFailed("panicked".to_string())));
        assert_settled(&state);
        assert!(state.error().unwrap().contains("panicked"));
    }

    #[test]
    fn test_dismiss_messages() {
        let mut state = WorkflowState::new();
        state.begin(Action::Parse);
        state.settle_parse(Err(ApiError::Rejected("bad".to_string())));
        state.dismiss_messages();
        assert!(state.error().is_none());
        assert!(state.success().is_none());
    }

    #[test]
    fn test_can_dispatch() {
        let mut state = WorkflowState::new();
        let url = "https://acme.atlassian.net/browse/PROJ-42";
        assert!(state.can_dispatch(url));
        assert!(!state.can_dispatch("https://acme.atlassian.net/browse/proj-42"));

        state.begin(Action::Parse);
        assert!(!state.can_dispatch(url));
    }
}
