//! Plain-text rendering for the one-shot commands.

use std::fmt::Write;
use std::path::Path;

use crate::api::types::{IssueData, JiraProbe, TestSuite};
use crate::workflow::WorkflowState;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Backend reachability and readiness after the startup checks.
///
/// `log_dir` is listed last so users know where to look after a failure.
pub fn format_status(state: &WorkflowState, base_url: &str, log_dir: Option<&Path>) -> String {
    let mut out = String::new();
    let reachable = if state.api_reachable() {
        "connected"
    } else {
        "unreachable"
    };
    let _ = writeln!(out, "Backend:        {} ({})", base_url, reachable);

    match state.config() {
        Some(config) => {
            let _ = writeln!(out, "Jira auth:      {}", yes_no(config.authentication_ready));
            let _ = writeln!(out, "  token:        {}", yes_no(config.auth_token_configured));
            let _ = writeln!(out, "  email:        {}", yes_no(config.jira_email_configured));
            let _ = writeln!(out, "AI generation:  {}", yes_no(config.gemini_api_configured));
            if let Some(url) = &config.jira_base_url {
                let _ = writeln!(out, "Jira URL:       {}", url);
            }
            if let Some(project) = &config.default_project_key {
                let _ = writeln!(out, "Project:        {}", project);
            }
            if let Some(warning) = config.readiness_warning() {
                let _ = writeln!(out, "\nwarning: {}", warning);
            }
        }
        None => {
            let _ = writeln!(out, "Configuration:  unavailable");
        }
    }

    if let Some(error) = state.error() {
        let _ = writeln!(out, "\nerror: {}", error);
    }
    if let Some(dir) = log_dir {
        let _ = writeln!(out, "\nLogs:           {}", dir.display());
    }
    out.trim_end().to_string()
}

/// Result of the backend's Jira credential probe.
pub fn format_probe(probe: &JiraProbe) -> String {
    let mut out = format!(
        "Jira connection: {}",
        if probe.success { "ok" } else { "failed" }
    );
    if let Some(code) = probe.status_code {
        let _ = write!(out, " (HTTP {})", code);
    }
    if let Some(preview) = &probe.response_preview {
        let _ = write!(out, "\n{}", preview);
    }
    out
}

/// Issue metadata, one field per line.
pub fn format_issue(issue: &IssueData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", issue);
    let _ = writeln!(out, "  Status:   {}", issue.status);
    let _ = writeln!(out, "  Priority: {}", issue.priority);
    if let Some(issue_type) = &issue.issue_type {
        let _ = writeln!(out, "  Type:     {}", issue_type);
    }
    let _ = writeln!(out, "  Assignee: {}", issue.assignee_name());
    let _ = writeln!(out, "  Reporter: {}", issue.reporter);
    if let Some(created) = issue.created_date() {
        let _ = writeln!(out, "  Created:  {}", created);
    }
    if let Some(updated) = issue.updated_date() {
        let _ = writeln!(out, "  Updated:  {}", updated);
    }
    if let Some(description) = &issue.description {
        let _ = writeln!(out, "\n{}", description);
    }
    out.trim_end().to_string()
}

/// A generated suite with every case, its steps and test data.
pub fn format_test_suite(suite: &TestSuite) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} test cases)",
        suite.suite_name, suite.total_test_cases
    );
    if !suite.suite_description.is_empty() {
        let _ = writeln!(out, "{}", suite.suite_description);
    }

    for case in &suite.test_cases {
        let _ = writeln!(out, "\n[{}] {}", case.test_case_id, case.title);
        let _ = write!(out, "  priority: {}, type: {}", case.priority, case.test_type);
        if let Some(duration) = &case.estimated_duration {
            let _ = write!(out, ", estimate: {}", duration);
        }
        let _ = writeln!(out);
        if !case.description.is_empty() {
            let _ = writeln!(out, "  {}", case.description);
        }
        if !case.preconditions.is_empty() {
            let _ = writeln!(out, "  Preconditions:");
            for precondition in &case.preconditions {
                let _ = writeln!(out, "    - {}", precondition);
            }
        }
        if !case.test_steps.is_empty() {
            let _ = writeln!(out, "  Steps:");
            for step in &case.test_steps {
                let _ = writeln!(
                    out,
                    "    {}. {} => {}",
                    step.step_number, step.step_description, step.expected_result
                );
            }
        }
        if let Some(data) = case.test_data.as_ref().filter(|d| !d.is_empty()) {
            if let Some(input) = &data.input_data {
                let _ = writeln!(out, "  Input:    {}", input);
            }
            if let Some(expected) = &data.expected_output {
                let _ = writeln!(out, "  Expected: {}", expected);
            }
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{ConfigStatus, TestCase, TestData, TestPriority, TestStep, TestType};
    use crate::api::ApiError;

    #[test]
    fn test_status_with_warning() {
        let mut state = WorkflowState::new();
        state.apply_health(&Ok(()));
        state.apply_config(Ok(ConfigStatus {
            auth_token_configured: true,
            jira_email_configured: false,
            authentication_ready: false,
            gemini_api_configured: true,
            jira_base_url: Some("https://acme.atlassian.net".to_string()),
            default_project_key: None,
            auth_token_length: Some(24),
        }));

        let text = format_status(&state, "http://localhost:8000", None);
        assert!(text.contains("http://localhost:8000 (connected)"));
        assert!(text.contains("Jira URL:       https://acme.atlassian.net"));
        assert!(text.contains("warning: Authentication is not configured"));
    }

    #[test]
    fn test_status_without_config() {
        let mut state = WorkflowState::new();
        state.apply_config(Err(ApiError::Rejected("down".to_string())));
        let text = format_status(
            &state,
            "http://localhost:8000",
            Some(Path::new("/var/log/jiracase")),
        );
        assert!(text.contains("unreachable"));
        assert!(text.contains("Configuration:  unavailable"));
        assert!(text.contains("error: Failed to load API configuration"));
        assert!(text.ends_with("Logs:           /var/log/jiracase"));
    }

    #[test]
    fn test_issue_unassigned() {
        let issue = IssueData {
            issue_key: "PROJ-42".to_string(),
            title: "Checkout".to_string(),
            created: "2024-01-15T10:30:00.000+0000".to_string(),
            ..Default::default()
        };
        let text = format_issue(&issue);
        assert!(text.starts_with("PROJ-42: Checkout"));
        assert!(text.contains("Assignee: Unassigned"));
        assert!(text.contains("Created:  2024-01-15"));
        assert!(!text.contains("Updated:"));
    }

    #[test]
    fn test_suite_lists_steps_and_data() {
        let suite = TestSuite {
            suite_name: "Checkout".to_string(),
            suite_description: String::new(),
            total_test_cases: 1,
            test_cases: vec![TestCase {
                test_case_id: "TC001".to_string(),
                title: "Coupon".to_string(),
                priority: TestPriority::High,
                test_type: TestType::Functional,
                test_steps: vec![TestStep {
                    step_number: 1,
                    step_description: "Apply SAVE10".to_string(),
                    expected_result: "Total drops".to_string(),
                }],
                test_data: Some(TestData {
                    input_data: Some("SAVE10".to_string()),
                    expected_output: None,
                }),
                ..Default::default()
            }],
        };

        let text = format_test_suite(&suite);
        assert!(text.starts_with("Checkout (1 test cases)"));
        assert!(text.contains("[TC001] Coupon"));
        assert!(text.contains("priority: high, type: functional"));
        assert!(text.contains("1. Apply SAVE10 => Total drops"));
        assert!(text.contains("Input:    SAVE10"));
    }

    #[test]
    fn test_probe_failure() {
        let probe = JiraProbe {
            status_code: Some(401),
            success: false,
            response_preview: None,
        };
        assert_eq!(format_probe(&probe), "Jira connection: failed (HTTP 401)");
    }
}
