//! JSON export of a generated test suite.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::api::types::TestSuite;
use crate::error::Result;

/// Wrapper matching the backend's `{"test_suite": ...}` envelope.
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    test_suite: &'a TestSuite,
}

/// File name for an exported suite: `test_cases_<name>.json`, where every
/// character outside `[A-Za-z0-9]` becomes `_`.
pub fn export_file_name(suite_name: &str) -> String {
    if suite_name.is_empty() {
        return "test_cases_export.json".to_string();
    }

    let sanitized: String = suite_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("test_cases_{}.json", sanitized)
}

/// Render the export document as pretty-printed JSON.
pub fn to_json(suite: &TestSuite) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportDocument { test_suite: suite })?)
}

/// Write `suite` into `dir`, returning the path of the new file.
///
/// An existing file with the same name is overwritten.
pub fn write_test_suite(dir: &Path, suite: &TestSuite) -> Result<PathBuf> {
    let path = dir.join(export_file_name(&suite.suite_name));
    fs::write(&path, to_json(suite)?)?;
    info!(path = %path.display(), test_cases = suite.test_cases.len(), "Exported test suite");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{TestCase, TestPriority};
    use tempfile::TempDir;

    fn suite(name: &str) -> TestSuite {
        TestSuite {
            suite_name: name.to_string(),
            suite_description: "Checkout coverage".to_string(),
            total_test_cases: 1,
            test_cases: vec![TestCase {
                test_case_id: "TC001".to_string(),
                title: "Coupon reduces total".to_string(),
                priority: TestPriority::High,
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_export_file_name_sanitizes() {
        assert_eq!(
            export_file_name("PROJ-42: Checkout / Discounts"),
            "test_cases_PROJ_42__Checkout___Discounts.json"
        );
        assert_eq!(export_file_name("Plain"), "test_cases_Plain.json");
    }

    #[test]
    fn test_export_file_name_empty() {
        assert_eq!(export_file_name(""), "test_cases_export.json");
    }

    #[test]
    fn test_write_test_suite() {
        let dir = TempDir::new().unwrap();
        let path = write_test_suite(dir.path(), &suite("Checkout")).unwrap();
        assert_eq!(path, dir.path().join("test_cases_Checkout.json"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["test_suite"]["suite_name"], "Checkout");
        assert_eq!(written["test_suite"]["test_cases"][0]["test_case_id"], "TC001");
        assert_eq!(written["test_suite"]["test_cases"][0]["priority"], "high");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(write_test_suite(&missing, &suite("Checkout")).is_err());
    }
}
