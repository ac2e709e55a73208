//! Serde model of the test runner's JSON summary.
//!
//! Only the fields the Markdown report reads are modelled; anything else in
//! the file is ignored. Optional collections default to empty.

use serde::{Deserialize, Serialize};

/// A complete test run as written by the runner's JSON reporter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRunSummary {
    /// Top-level suites (usually one per spec file)
    pub suites: Vec<Suite>,

    /// Aggregate numbers reported by the runner
    pub stats: RunStats,
}

/// Runner-reported aggregates. Only `duration` is used for the report;
/// per-status counts are recomputed from the test list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Wall-clock duration in milliseconds
    pub duration: f64,
    #[serde(default)]
    pub expected: u64,
    #[serde(default)]
    pub unexpected: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub flaky: u64,
}

/// A (possibly nested) `describe` block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Suite {
    pub title: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub specs: Vec<Spec>,
    #[serde(default)]
    pub suites: Vec<Suite>,
}

/// One `test(...)` declaration; holds a result per project it ran in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spec {
    pub title: String,
    #[serde(default)]
    pub tests: Vec<TestResult>,
}

/// Outcome of a test in one project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    #[serde(default)]
    pub title: String,
    pub status: TestStatus,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: f64,
    /// Project (viewport) the test ran under, e.g. "mobile-chromium"
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub errors: Vec<TestError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    TimedOut,
    Interrupted,
    #[serde(other)]
    Other,
}

/// A file or blob attached to a test result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl Attachment {
    /// Screenshot attachments produced by a failed visual comparison
    pub fn is_visual_diff(&self) -> bool {
        ["diff", "actual", "expected"]
            .iter()
            .any(|marker| self.name.contains(marker))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
}

impl TestResult {
    /// Project name, or "unknown" when the runner didn't record one
    pub fn viewport_label(&self) -> &str {
        match self.project_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "unknown",
        }
    }
}

impl TestRunSummary {
    /// Every test result in suite order, see [`crate::results::collect_tests`]
    pub fn all_tests(&self) -> Vec<&TestResult> {
        self.suites
            .iter()
            .flat_map(crate::results::collect_tests)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserialize() {
        let statuses: Vec<TestStatus> =
            serde_json::from_str(r#"["passed","failed","skipped","timedOut","interrupted","flaky"]"#)
                .unwrap();
        assert_eq!(
            statuses,
            vec![
                TestStatus::Passed,
                TestStatus::Failed,
                TestStatus::Skipped,
                TestStatus::TimedOut,
                TestStatus::Interrupted,
                TestStatus::Other,
            ]
        );
    }

    #[test]
    fn test_result_defaults() {
        let result: TestResult = serde_json::from_str(r#"{"status":"failed"}"#).unwrap();
        assert_eq!(result.title, "");
        assert_eq!(result.viewport_label(), "unknown");
        assert!(result.attachments.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_result_project_name() {
        let result: TestResult = serde_json::from_str(
            r#"{"title":"home","status":"passed","duration":12.5,"projectName":"mobile-chromium"}"#,
        )
        .unwrap();
        assert_eq!(result.viewport_label(), "mobile-chromium");
        assert_eq!(result.duration, 12.5);
    }

    #[test]
    fn test_attachment_is_visual_diff() {
        let named = |name: &str| Attachment {
            name: name.to_string(),
            path: None,
            content_type: None,
        };
        assert!(named("homepage-diff").is_visual_diff());
        assert!(named("homepage-actual").is_visual_diff());
        assert!(named("homepage-expected").is_visual_diff());
        assert!(!named("trace").is_visual_diff());
        assert!(!named("screenshot").is_visual_diff());
    }
}
