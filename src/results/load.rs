use std::fs;
use std::path::Path;
use tracing::debug;

use crate::report::types::{ReportError, ReportResult};
use crate::results::types::{Suite, TestResult, TestRunSummary};

/// Read and parse a JSON run summary.
///
/// Returns `Ok(None)` when the file doesn't exist (the tests probably never
/// ran). Unreadable or malformed files are errors.
pub fn load_summary(path: &Path) -> ReportResult<Option<TestRunSummary>> {
    if !path.exists() {
        debug!(path = %path.display(), "no results file");
        return Ok(None);
    }

    let raw = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    let summary = serde_json::from_str(&raw).map_err(|e| ReportError::parse(path, e))?;
    Ok(Some(summary))
}

/// Flatten a suite tree depth-first: the suite's own spec results first, then
/// each child suite in listed order.
pub fn collect_tests(suite: &Suite) -> Vec<&TestResult> {
    let mut tests: Vec<&TestResult> = suite.specs.iter().flat_map(|spec| &spec.tests).collect();

    for child in &suite.suites {
        tests.extend(collect_tests(child));
    }

    tests
}
