//! Visual Report - summaries of visual regression test runs.
//!
//! This crate provides:
//! - Artifact matching: finds diff/actual/expected screenshot triples left
//!   behind by failed visual tests and collapses retries
//! - A self-contained HTML diff report with the screenshots inlined
//! - A Markdown report built from the test runner's JSON summary, for PR
//!   comments and CI step summaries
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use visual_report::report::write_html_report;
//!
//! let outcome = write_html_report(Path::new("test-results"), Path::new("visual-diffs.html")).unwrap();
//! println!("{}", outcome.summary_line());
//! ```

pub mod artifacts;
pub mod config;
pub mod logging;
pub mod report;
pub mod results;

// Re-export artifact types
pub use artifacts::{TestImageTriple, Viewport, find_test_images};

// Re-export report generation
pub use report::{
    HtmlReportOutcome, MarkdownOptions, ReportError, ReportResult, generate_markdown_report,
    render_html, render_markdown, write_html_report,
};

// Re-export the summary model
pub use results::{TestResult, TestRunSummary, TestStatus, load_summary};
