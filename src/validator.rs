//! Issue URL validation.
//!
//! A URL is accepted only when it points straight at an issue page:
//! `http(s)://<host>/browse/<PROJECT>-<NUMBER>`, with nothing after the number.

use std::sync::OnceLock;

use regex::Regex;

/// Pattern for a browse URL. The key group captures `PROJECT-123`.
const ISSUE_URL_PATTERN: &str = r"^https?://[^/]+/browse/(?P<key>[A-Z]+-[0-9]+)$";

/// Hint shown next to the URL field while the value is invalid.
pub const INVALID_URL_HINT: &str =
    "Please enter a valid Jira URL (e.g., https://company.atlassian.net/browse/PROJECT-123)";

fn issue_url_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ISSUE_URL_PATTERN).expect("issue URL pattern is valid"))
}

/// Check whether `candidate` is a well-formed Jira issue URL.
pub fn is_valid_issue_url(candidate: &str) -> bool {
    issue_url_regex().is_match(candidate)
}

/// Extract the issue key (`PROJ-42`) from a valid issue URL.
///
/// Returns `None` when the URL does not pass [`is_valid_issue_url`].
pub fn issue_key(candidate: &str) -> Option<&str> {
    issue_url_regex()
        .captures(candidate)
        .and_then(|caps| caps.name("key"))
        .map(|m| m.as_str())
}

/// Inline feedback for a URL field.
///
/// Empty input gets no hint so the field does not nag before the user types.
pub fn validation_hint(candidate: &str) -> Option<&'static str> {
    if candidate.is_empty() || is_valid_issue_url(candidate) {
        None
    } else {
        Some(INVALID_URL_HINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https_issue_url() {
        assert!(is_valid_issue_url("https://acme.atlassian.net/browse/PROJ-42"));
    }

    #[test]
    fn test_accepts_http_and_custom_host() {
        assert!(is_valid_issue_url("http://jira.internal:8080/browse/ABC-1"));
        assert!(is_valid_issue_url("https://localhost/browse/X-999999"));
    }

    #[test]
    fn test_rejects_lowercase_project_key() {
        assert!(!is_valid_issue_url("https://acme.atlassian.net/browse/proj-42"));
    }

    #[test]
    fn test_rejects_trailing_slash() {
        assert!(!is_valid_issue_url("https://acme.atlassian.net/browse/PROJ-42/"));
    }

    #[test]
    fn test_rejects_missing_number() {
        assert!(!is_valid_issue_url("https://acme.atlassian.net/browse/PROJ-"));
        assert!(!is_valid_issue_url("https://acme.atlassian.net/browse/PROJ"));
    }

    #[test]
    fn test_rejects_query_and_extra_segments() {
        assert!(!is_valid_issue_url(
            "https://acme.atlassian.net/browse/PROJ-42?focusedCommentId=1"
        ));
        assert!(!is_valid_issue_url(
            "https://acme.atlassian.net/jira/browse/PROJ-42"
        ));
    }

    #[test]
    fn test_rejects_other_schemes_and_garbage() {
        assert!(!is_valid_issue_url("ftp://acme.atlassian.net/browse/PROJ-42"));
        assert!(!is_valid_issue_url("acme.atlassian.net/browse/PROJ-42"));
        assert!(!is_valid_issue_url(""));
        assert!(!is_valid_issue_url(" https://acme.atlassian.net/browse/PROJ-42"));
    }

    #[test]
    fn test_rejects_project_key_with_digits() {
        assert!(!is_valid_issue_url("https://acme.atlassian.net/browse/PR0J-42"));
    }

    #[test]
    fn test_issue_key_extraction() {
        assert_eq!(
            issue_key("https://acme.atlassian.net/browse/PROJ-42"),
            Some("PROJ-42")
        );
        assert_eq!(issue_key("https://acme.atlassian.net/browse/proj-42"), None);
    }

    #[test]
    fn test_validation_hint() {
        assert_eq!(validation_hint(""), None);
        assert_eq!(
            validation_hint("https://acme.atlassian.net/browse/PROJ-42"),
            None
        );
        assert_eq!(validation_hint("not a url"), Some(INVALID_URL_HINT));
    }
}
