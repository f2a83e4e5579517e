//! Backend request and response types.
//!
//! These types model the JSON exchanged with the test case backend. Field
//! names follow the backend's `snake_case` wire format. Decoding is lenient
//! about `null` and missing strings because the backend forwards whatever the
//! tracker and the AI model produced, but every payload still lands in a
//! fully typed value.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend readiness, returned by `GET /config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStatus {
    /// Whether a Jira API token is configured on the backend.
    pub auth_token_configured: bool,
    /// Whether a Jira account email is configured on the backend.
    pub jira_email_configured: bool,
    /// Whether both token and email are present.
    pub authentication_ready: bool,
    /// Whether the AI backend key is configured.
    pub gemini_api_configured: bool,
    /// The tracker base URL the backend is pointed at.
    #[serde(default)]
    pub jira_base_url: Option<String>,
    /// The backend's default project key.
    #[serde(default)]
    pub default_project_key: Option<String>,
    /// Length of the configured token (the token itself is never exposed).
    #[serde(default)]
    pub auth_token_length: Option<u32>,
}

impl ConfigStatus {
    /// Both tracker authentication and AI generation are available.
    pub fn is_ready(&self) -> bool {
        self.authentication_ready && self.gemini_api_configured
    }

    /// Describe what is missing, or `None` when the backend is ready.
    pub fn readiness_warning(&self) -> Option<&'static str> {
        match (self.authentication_ready, self.gemini_api_configured) {
            (true, true) => None,
            (false, false) => Some(
                "Both authentication and AI configuration are not ready. Please check your .env file.",
            ),
            (false, true) => Some(
                "Authentication is not configured. Please check your Jira credentials in the .env file.",
            ),
            (true, false) => Some(
                "AI configuration is not ready. Please check your Gemini API key in the .env file.",
            ),
        }
    }
}

/// A normalized Jira issue, returned by the parse endpoints and embedded in
/// the generate response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueData {
    /// The issue key (e.g., "PROJ-123").
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue_key: String,
    /// The issue summary.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Workflow status name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Priority name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: String,
    /// Assignee display name; `None` when unassigned.
    #[serde(default, deserialize_with = "optional_text")]
    pub assignee: Option<String>,
    /// Reporter display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reporter: String,
    /// Creation timestamp as sent by the tracker.
    #[serde(default, alias = "created_date", deserialize_with = "null_as_default")]
    pub created: String,
    /// Last update timestamp as sent by the tracker.
    #[serde(default, alias = "updated_date", deserialize_with = "null_as_default")]
    pub updated: String,
    /// Issue description, if any.
    #[serde(default, deserialize_with = "optional_text")]
    pub description: Option<String>,
    /// Issue type name (Bug, Story, ...).
    #[serde(default, deserialize_with = "optional_text")]
    pub issue_type: Option<String>,
    /// Project key derived from the issue key.
    #[serde(default, deserialize_with = "optional_text")]
    pub project_key: Option<String>,
    /// The URL that was parsed.
    #[serde(default, deserialize_with = "optional_text")]
    pub url: Option<String>,
}

impl IssueData {
    /// Assignee name, or "Unassigned".
    pub fn assignee_name(&self) -> &str {
        self.assignee.as_deref().unwrap_or("Unassigned")
    }

    /// Creation date without the time component.
    pub fn created_date(&self) -> Option<&str> {
        date_part(&self.created)
    }

    /// Update date without the time component.
    pub fn updated_date(&self) -> Option<&str> {
        date_part(&self.updated)
    }
}

impl fmt::Display for IssueData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.issue_key, self.title)
    }
}

/// Strip the time from an ISO-8601 timestamp (`2024-01-15T10:30:00.000+0000`).
fn date_part(timestamp: &str) -> Option<&str> {
    timestamp.split('T').next().filter(|d| !d.is_empty())
}

/// Priority assigned to a generated test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum TestPriority {
    High,
    Medium,
    Low,
    /// Missing or unrecognized priority.
    #[default]
    Unset,
}

impl TestPriority {
    /// Lowercase wire name, empty for `Unset`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestPriority::High => "high",
            TestPriority::Medium => "medium",
            TestPriority::Low => "low",
            TestPriority::Unset => "",
        }
    }
}

impl From<Option<String>> for TestPriority {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("high") => TestPriority::High,
            Some("medium") => TestPriority::Medium,
            Some("low") => TestPriority::Low,
            _ => TestPriority::Unset,
        }
    }
}

impl From<TestPriority> for Option<String> {
    fn from(value: TestPriority) -> Self {
        match value {
            TestPriority::Unset => None,
            other => Some(other.as_str().to_string()),
        }
    }
}

impl fmt::Display for TestPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestPriority::Unset => f.write_str("unset"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Category of a generated test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum TestType {
    Functional,
    Performance,
    Security,
    Usability,
    Integration,
    /// Missing or unrecognized type.
    #[default]
    Unset,
}

impl TestType {
    /// Lowercase wire name, empty for `Unset`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Functional => "functional",
            TestType::Performance => "performance",
            TestType::Security => "security",
            TestType::Usability => "usability",
            TestType::Integration => "integration",
            TestType::Unset => "",
        }
    }
}

impl From<Option<String>> for TestType {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("functional") => TestType::Functional,
            Some("performance") => TestType::Performance,
            Some("security") => TestType::Security,
            Some("usability") => TestType::Usability,
            Some("integration") => TestType::Integration,
            _ => TestType::Unset,
        }
    }
}

impl From<TestType> for Option<String> {
    fn from(value: TestType) -> Self {
        match value {
            TestType::Unset => None,
            other => Some(other.as_str().to_string()),
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestType::Unset => f.write_str("unset"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One step of a test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStep {
    #[serde(default)]
    pub step_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_result: String,
}

/// Sample input and expected output for a test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestData {
    #[serde(default, deserialize_with = "optional_text")]
    pub input_data: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub expected_output: Option<String>,
}

impl TestData {
    /// Neither input nor expected output is present.
    pub fn is_empty(&self) -> bool {
        self.input_data.is_none() && self.expected_output.is_none()
    }
}

/// A single generated test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_case_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub priority: TestPriority,
    #[serde(default)]
    pub test_type: TestType,
    #[serde(default, deserialize_with = "optional_text")]
    pub estimated_duration: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preconditions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_steps: Vec<TestStep>,
    #[serde(default)]
    pub test_data: Option<TestData>,
}

/// An AI-generated test suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    #[serde(default, deserialize_with = "null_as_default")]
    pub suite_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suite_description: String,
    #[serde(default)]
    pub total_test_cases: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_cases: Vec<TestCase>,
}

/// Result of `POST /generate-test-cases`: the issue context and its suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTestCases {
    pub issue: IssueData,
    pub test_suite: TestSuite,
}

/// Wire shape of the generate response.
#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedPayload {
    #[serde(flatten)]
    issue: IssueData,
    test_cases: TestCasesEnvelope,
}

#[derive(Debug, Deserialize)]
struct TestCasesEnvelope {
    test_suite: TestSuite,
}

impl GeneratedPayload {
    pub(crate) fn into_generated(self) -> GeneratedTestCases {
        GeneratedTestCases {
            issue: self.issue,
            test_suite: self.test_cases.test_suite,
        }
    }
}

/// Result of the backend's tracker connectivity probe (`GET /test-jira`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraProbe {
    /// HTTP status the tracker answered with.
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Whether the tracker accepted the backend's credentials.
    #[serde(default)]
    pub success: bool,
    /// First bytes of the tracker's response body.
    #[serde(default, deserialize_with = "optional_text")]
    pub response_preview: Option<String>,
}

/// Body of `POST /parse` and `POST /generate-test-cases`.
#[derive(Debug, Serialize)]
pub(crate) struct IssueUrlRequest<'a> {
    pub url: &'a str,
}

/// Body of `POST /parse-with-auth`.
#[derive(Debug, Serialize)]
pub(crate) struct IssueUrlWithAuthRequest<'a> {
    pub url: &'a str,
    pub auth_token: &'a str,
}

/// Extract a payload-embedded error message.
///
/// Empty strings, `false` and `null` do not count as errors. Any other
/// non-string value is reported as its JSON text.
pub(crate) fn embedded_error(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Text fields the AI model sometimes fills with objects or numbers.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_issue_json() -> Value {
        json!({
            "issue_key": "PROJ-42",
            "project_key": "PROJ",
            "url": "https://acme.atlassian.net/browse/PROJ-42",
            "title": "Login fails with SSO",
            "description": "Users cannot log in via SSO",
            "status": "In Progress",
            "assignee": "",
            "reporter": "Dana",
            "priority": "High",
            "issue_type": "Bug",
            "created_date": "2024-01-15T10:30:00.000+0000",
            "updated_date": "2024-01-16T08:00:00.000+0000",
            "error": null
        })
    }

    #[test]
    fn test_issue_data_decodes_backend_names() {
        let issue: IssueData = serde_json::from_value(sample_issue_json()).unwrap();
        assert_eq!(issue.issue_key, "PROJ-42");
        assert_eq!(issue.title, "Login fails with SSO");
        assert_eq!(issue.created, "2024-01-15T10:30:00.000+0000");
        assert_eq!(issue.created_date(), Some("2024-01-15"));
        assert_eq!(issue.updated_date(), Some("2024-01-16"));
        assert_eq!(issue.issue_type.as_deref(), Some("Bug"));
        assert_eq!(issue.to_string(), "PROJ-42: Login fails with SSO");
    }

    #[test]
    fn test_issue_data_empty_assignee_is_unassigned() {
        let issue: IssueData = serde_json::from_value(sample_issue_json()).unwrap();
        assert_eq!(issue.assignee, None);
        assert_eq!(issue.assignee_name(), "Unassigned");
    }

    #[test]
    fn test_issue_data_tolerates_nulls_and_missing_fields() {
        let issue: IssueData = serde_json::from_value(json!({
            "issue_key": "PROJ-7",
            "title": null,
            "description": "Only some fields"
        }))
        .unwrap();
        assert_eq!(issue.issue_key, "PROJ-7");
        assert_eq!(issue.title, "");
        assert_eq!(issue.status, "");
        assert_eq!(issue.created_date(), None);
        assert_eq!(issue.description.as_deref(), Some("Only some fields"));
    }

    #[test]
    fn test_priority_and_type_are_case_insensitive() {
        let case: TestCase = serde_json::from_value(json!({
            "test_case_id": "TC-1",
            "title": "Valid login",
            "priority": "HIGH",
            "test_type": " Security "
        }))
        .unwrap();
        assert_eq!(case.priority, TestPriority::High);
        assert_eq!(case.test_type, TestType::Security);
    }

    #[test]
    fn test_unknown_priority_and_type_become_unset() {
        let case: TestCase = serde_json::from_value(json!({
            "priority": "critical",
            "test_type": null
        }))
        .unwrap();
        assert_eq!(case.priority, TestPriority::Unset);
        assert_eq!(case.test_type, TestType::Unset);
        assert_eq!(case.priority.to_string(), "unset");
    }

    #[test]
    fn test_unset_enums_serialize_as_null() {
        let case = TestCase {
            priority: TestPriority::Medium,
            ..Default::default()
        };
        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(value["priority"], json!("medium"));
        assert_eq!(value["test_type"], Value::Null);
    }

    #[test]
    fn test_test_data_keeps_structured_values_as_text() {
        let data: TestData = serde_json::from_value(json!({
            "input_data": {"username": "dana"},
            "expected_output": "Dashboard is shown"
        }))
        .unwrap();
        assert_eq!(
            data.input_data.as_deref(),
            Some(r#"{"username":"dana"}"#)
        );
        assert_eq!(data.expected_output.as_deref(), Some("Dashboard is shown"));
        assert!(!data.is_empty());
    }

    #[test]
    fn test_generated_payload_splits_issue_and_suite() {
        let payload: GeneratedPayload = serde_json::from_value(json!({
            "issue_key": "PROJ-42",
            "title": "Login fails with SSO",
            "description": "Users cannot log in via SSO",
            "test_cases": {
                "test_suite": {
                    "suite_name": "SSO Login",
                    "suite_description": "Covers SSO login",
                    "total_test_cases": 1,
                    "test_cases": [{
                        "test_case_id": "TC-001",
                        "title": "Login with valid SSO account",
                        "description": "Happy path",
                        "priority": "high",
                        "test_type": "functional",
                        "estimated_duration": "5 minutes",
                        "preconditions": ["SSO provider is reachable"],
                        "test_steps": [{
                            "step_number": 1,
                            "step_description": "Open the login page",
                            "expected_result": "SSO button is visible"
                        }],
                        "test_data": {"input_data": "valid account", "expected_output": null}
                    }]
                }
            },
            "error": null
        }))
        .unwrap();

        let generated = payload.into_generated();
        assert_eq!(generated.issue.issue_key, "PROJ-42");
        assert_eq!(generated.test_suite.suite_name, "SSO Login");
        assert_eq!(generated.test_suite.test_cases.len(), 1);

        let case = &generated.test_suite.test_cases[0];
        assert_eq!(case.test_steps[0].step_number, 1);
        assert_eq!(case.preconditions, vec!["SSO provider is reachable"]);
        assert_eq!(
            case.test_data.as_ref().and_then(|d| d.expected_output.clone()),
            None
        );
    }

    #[test]
    fn test_generated_payload_requires_test_suite() {
        let result = serde_json::from_value::<GeneratedPayload>(json!({
            "issue_key": "PROJ-42",
            "test_cases": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_status_readiness() {
        let mut status: ConfigStatus = serde_json::from_value(json!({
            "jira_base_url": "https://acme.atlassian.net",
            "default_project_key": null,
            "auth_token_configured": true,
            "auth_token_length": 24,
            "jira_email_configured": true,
            "authentication_ready": true,
            "gemini_api_configured": false
        }))
        .unwrap();
        assert!(!status.is_ready());
        assert!(status.readiness_warning().unwrap().contains("Gemini"));
        assert_eq!(status.auth_token_length, Some(24));

        status.gemini_api_configured = true;
        assert!(status.is_ready());
        assert_eq!(status.readiness_warning(), None);

        status.authentication_ready = false;
        status.gemini_api_configured = false;
        assert!(status.readiness_warning().unwrap().starts_with("Both"));
    }

    #[test]
    fn test_config_status_requires_flags() {
        assert!(serde_json::from_value::<ConfigStatus>(json!({"jira_base_url": "x"})).is_err());
    }

    #[test]
    fn test_embedded_error_detection() {
        assert_eq!(
            embedded_error(&json!({"error": "issue not found"})),
            Some("issue not found".to_string())
        );
        assert_eq!(embedded_error(&json!({"error": null, "title": "x"})), None);
        assert_eq!(embedded_error(&json!({"error": ""})), None);
        assert_eq!(embedded_error(&json!({"title": "x"})), None);
        assert_eq!(
            embedded_error(&json!({"error": {"code": 1}})),
            Some(r#"{"code":1}"#.to_string())
        );
    }
}
