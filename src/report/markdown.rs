//! Markdown summary of a test run, for PR comments and CI step summaries.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config;
use crate::report::types::{ReportError, ReportResult};
use crate::results::{TestResult, TestRunSummary, TestStatus, load_summary};

/// Returned instead of a report when the results file is missing
pub const MISSING_RESULTS_WARNING: &str = "⚠️ No test results found. Tests may not have run.";

static PIXEL_DIFF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*pixels.*differ").expect("valid pixel diff pattern")
});

const SCREENSHOT_MISMATCH: &str = "Screenshot comparison failed";

/// Rendering options for the Markdown report
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Raw error messages longer than this many characters are cut off
    pub max_error_chars: usize,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            max_error_chars: config::max_error_chars(),
        }
    }
}

impl MarkdownOptions {
    pub fn max_error_chars(mut self, max: usize) -> Self {
        self.max_error_chars = max;
        self
    }
}

/// Format a millisecond duration as `850ms`, `12.3s` or `4.5m`
pub fn format_duration(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{}ms", ms)
    } else if ms < 60000.0 {
        format!("{}s", one_decimal(ms / 1000.0))
    } else {
        format!("{}m", one_decimal(ms / 60000.0))
    }
}

/// One decimal place, rounding the exact binary value; exact midpoints go up.
///
/// A midpoint at one decimal is only representable as an odd multiple of
/// 0.25, which `* 4.0` detects exactly. Everything else goes through the
/// formatter, which rounds the exact value (1.15 is stored below the
/// midpoint and gives "1.1").
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/// Pixel count from a screenshot mismatch message, e.g. "1234 pixels (0.5%) differ"
pub fn extract_pixel_diff(message: &str) -> Option<&str> {
    PIXEL_DIFF_PATTERN
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn viewport_emoji(project_name: &str) -> &'static str {
    if project_name.contains("mobile") {
        "📱"
    } else if project_name.contains("desktop") {
        "🖥️"
    } else {
        "🔲"
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Render the report with default options
pub fn render_markdown(summary: &TestRunSummary) -> String {
    render_markdown_with(summary, &MarkdownOptions::default())
}

/// Render a run summary as Markdown.
///
/// Counts come from the flattened test list; only the total duration is taken
/// from the runner's own stats.
pub fn render_markdown_with(summary: &TestRunSummary, options: &MarkdownOptions) -> String {
    let all_tests = summary.all_tests();
    let count = |status: TestStatus| all_tests.iter().filter(|t| t.status == status).count();

    let passed = count(TestStatus::Passed);
    let skipped = count(TestStatus::Skipped);
    let failed: Vec<&TestResult> = all_tests
        .iter()
        .copied()
        .filter(|t| t.status == TestStatus::Failed)
        .collect();

    let mut lines: Vec<String> = Vec::new();

    if failed.is_empty() {
        lines.push("## ✅ Visual Regression Tests Passed".to_string());
        lines.push(String::new());
        lines.push(format!(
            "All **{}** visual regression tests passed successfully.",
            passed
        ));
    } else {
        lines.push("## ❌ Visual Regression Tests Failed".to_string());
        lines.push(String::new());
        lines.push(format!(
            "**{}** of **{}** tests failed. Please review the visual differences below.",
            failed.len(),
            all_tests.len()
        ));
    }
    lines.push(String::new());

    lines.push("### Summary".to_string());
    lines.push(String::new());
    lines.push("| Status | Count |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| ✅ Passed | {} |", passed));
    lines.push(format!("| ❌ Failed | {} |", failed.len()));
    if skipped > 0 {
        lines.push(format!("| ⏭️ Skipped | {} |", skipped));
    }
    lines.push(format!(
        "| ⏱️ Duration | {} |",
        format_duration(summary.stats.duration)
    ));
    lines.push(String::new());

    if !failed.is_empty() {
        lines.push("### Failed Tests".to_string());
        lines.push(String::new());

        for (viewport, tests) in group_by_viewport(&failed) {
            lines.push(format!("#### {} {}", viewport_emoji(viewport), viewport));
            lines.push(String::new());
            for test in tests {
                push_failed_test(&mut lines, test, options);
            }
        }

        push_instructions(&mut lines);
    }

    lines.join("\n")
}

/// Group failures by project name, keeping first-seen group order
fn group_by_viewport<'a>(failed: &[&'a TestResult]) -> Vec<(&'a str, Vec<&'a TestResult>)> {
    let mut groups: Vec<(&'a str, Vec<&'a TestResult>)> = Vec::new();
    for &test in failed {
        let viewport = test.viewport_label();
        match groups.iter_mut().find(|(name, _)| *name == viewport) {
            Some((_, tests)) => tests.push(test),
            None => groups.push((viewport, vec![test])),
        }
    }
    groups
}

fn push_failed_test(lines: &mut Vec<String>, test: &TestResult, options: &MarkdownOptions) {
    lines.push("<details>".to_string());
    lines.push(format!("<summary><strong>{}</strong></summary>", test.title));
    lines.push(String::new());

    if let Some(error) = test.errors.first() {
        let message = error.message.as_deref().unwrap_or("Unknown error");

        if let Some(pixels) = extract_pixel_diff(message) {
            lines.push(format!(
                "**Difference:** {} pixels differ from baseline",
                pixels
            ));
        } else if message.contains(SCREENSHOT_MISMATCH) {
            lines.push("**Difference:** Screenshot does not match baseline".to_string());
        } else {
            lines.push("```".to_string());
            lines.push(truncate_chars(message, options.max_error_chars));
            lines.push("```".to_string());
        }
    }

    let visual: Vec<_> = test
        .attachments
        .iter()
        .filter(|a| a.is_visual_diff())
        .collect();
    if !visual.is_empty() {
        lines.push(String::new());
        lines.push("**Attachments:**".to_string());
        for attachment in visual {
            lines.push(format!("- {}", attachment.name.replace('-', " ")));
        }
    }

    lines.push(String::new());
    lines.push("</details>".to_string());
    lines.push(String::new());
}

const REVIEW_INSTRUCTIONS: &[&str] = &[
    "### 📥 How to Review",
    "",
    "1. **Download the artifact** from the workflow run (see link above)",
    "2. **Open the HTML report**: Extract and open `playwright-report/index.html`",
    "3. **Review side-by-side diffs**: The report shows Expected vs Actual vs Diff views",
    "",
    "The `test-results/` folder contains:",
    "| File | Description |",
    "|------|-------------|",
    "| `*-actual.png` | What the test captured |",
    "| `*-expected.png` | The baseline snapshot |",
    "| `*-diff.png` | Visual diff highlighting changes in pink |",
    "",
    "### 🔄 Updating Baselines",
    "",
    "If the visual changes are **intentional**, you can update baselines in two ways:",
    "",
    "**Option 1: Comment command** (easiest)",
    "",
    "Comment `/update-snapshots` on this PR to automatically update and commit new baselines.",
    "",
    "**Option 2: Local update**",
    "",
    "```bash",
    "bun run test:visual:update",
    "git add tests/__screenshots__/",
    "git commit -m \"test: update visual regression baselines\"",
    "```",
    "",
    "> ⚠️ **Review carefully!** Unintended visual changes may indicate a regression.",
];

fn push_instructions(lines: &mut Vec<String>) {
    lines.extend(REVIEW_INSTRUCTIONS.iter().map(|line| line.to_string()));
}

/// Load the summary at `results_path` and render it, or return
/// [`MISSING_RESULTS_WARNING`] when the file doesn't exist.
pub fn generate_markdown_report(results_path: &Path, options: &MarkdownOptions) -> ReportResult<String> {
    match load_summary(results_path)? {
        Some(summary) => {
            info!(path = %results_path.display(), "rendering markdown report");
            Ok(render_markdown_with(&summary, options))
        }
        None => Ok(MISSING_RESULTS_WARNING.to_string()),
    }
}

/// Write `report` to `output` if given, and return the text destined for
/// stdout: either the report itself or a confirmation line, never both.
pub fn deliver_report(report: &str, output: Option<&Path>) -> ReportResult<String> {
    match output {
        Some(path) => {
            fs::write(path, report).map_err(|e| ReportError::io(path, e))?;
            Ok(format!("Report written to {}", path.display()))
        }
        None => Ok(report.to_string()),
    }
}
