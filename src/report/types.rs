// Shared types for report generation

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of writing an HTML diff report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlReportOutcome {
    /// Where the report was written
    pub output_path: PathBuf,

    /// Number of failure cards in the report
    pub failures: usize,

    /// Artifact directories the cards were built from
    pub source_dirs: Vec<String>,
}

impl HtmlReportOutcome {
    /// One-line human readable summary
    pub fn summary_line(&self) -> String {
        format!(
            "HTML diff report generated: {} ({} failures)",
            self.output_path.display(),
            self.failures
        )
    }
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Error types for report operations
#[derive(Debug)]
pub enum ReportError {
    /// Reading or writing a file failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The JSON summary could not be parsed
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ReportError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        ReportError::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io { path, source } => {
                write!(f, "I/O error at {}: {}", path.display(), source)
            }
            ReportError::Parse { path, source } => {
                write!(f, "Failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io { source, .. } => Some(source),
            ReportError::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let outcome = HtmlReportOutcome {
            output_path: PathBuf::from("visual-diffs.html"),
            failures: 3,
            source_dirs: vec![],
        };
        assert_eq!(
            outcome.summary_line(),
            "HTML diff report generated: visual-diffs.html (3 failures)"
        );
    }

    #[test]
    fn test_error_display_includes_path() {
        let err = ReportError::io(
            "missing-diff.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "I/O error at missing-diff.png: gone");
    }
}
