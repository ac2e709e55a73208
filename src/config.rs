//! Configuration management with environment variable support.
//!
//! Every value has a default matching the layout the visual test runner
//! produces. Environment variables override the defaults; CLI flags override
//! both.
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `VISUAL_REPORT_RESULTS_DIR` | Artifact root scanned for screenshot triples | `test-results` |
//! | `VISUAL_REPORT_HTML_OUTPUT` | Output path of the HTML diff report | `visual-diffs.html` |
//! | `VISUAL_REPORT_RESULTS_JSON` | JSON summary consumed by the Markdown report | `test-results/results.json` |
//! | `VISUAL_REPORT_MAX_ERROR_CHARS` | Error message truncation length | `500` |
//!
//! # Example
//!
//! ```bash
//! export VISUAL_REPORT_RESULTS_DIR="artifacts/test-results"
//! export VISUAL_REPORT_MAX_ERROR_CHARS=2000
//! ```

use std::env;
use std::sync::OnceLock;

// ============================================================================
// Default Values
// ============================================================================

/// Default directory holding per-test artifact folders
pub const DEFAULT_RESULTS_DIR: &str = "test-results";

/// Default HTML report path
pub const DEFAULT_HTML_OUTPUT: &str = "visual-diffs.html";

/// Default JSON summary path
pub const DEFAULT_RESULTS_JSON: &str = "test-results/results.json";

/// Default maximum length of a raw error message in the Markdown report
pub const DEFAULT_MAX_ERROR_CHARS: usize = 500;

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the artifact root
pub const ENV_RESULTS_DIR: &str = "VISUAL_REPORT_RESULTS_DIR";

/// Environment variable for the HTML output path
pub const ENV_HTML_OUTPUT: &str = "VISUAL_REPORT_HTML_OUTPUT";

/// Environment variable for the JSON summary path
pub const ENV_RESULTS_JSON: &str = "VISUAL_REPORT_RESULTS_JSON";

/// Environment variable for the error truncation length
pub const ENV_MAX_ERROR_CHARS: &str = "VISUAL_REPORT_MAX_ERROR_CHARS";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration for report generation
#[derive(Debug, Clone)]
pub struct Config {
    /// Input/output locations
    pub paths: PathSettings,
    /// Markdown rendering knobs
    pub markdown: MarkdownSettings,
}

/// Input and output locations
#[derive(Debug, Clone)]
pub struct PathSettings {
    pub results_dir: String,
    pub html_output: String,
    pub results_json: String,
}

/// Markdown-report settings
#[derive(Debug, Clone)]
pub struct MarkdownSettings {
    /// Raw error messages longer than this are truncated
    pub max_error_chars: usize,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            paths: PathSettings::from_env(),
            markdown: MarkdownSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            paths: PathSettings::defaults(),
            markdown: MarkdownSettings::defaults(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl PathSettings {
    pub fn from_env() -> Self {
        Self {
            results_dir: env::var(ENV_RESULTS_DIR)
                .unwrap_or_else(|_| DEFAULT_RESULTS_DIR.to_string()),
            html_output: env::var(ENV_HTML_OUTPUT)
                .unwrap_or_else(|_| DEFAULT_HTML_OUTPUT.to_string()),
            results_json: env::var(ENV_RESULTS_JSON)
                .unwrap_or_else(|_| DEFAULT_RESULTS_JSON.to_string()),
        }
    }

    pub fn defaults() -> Self {
        Self {
            results_dir: DEFAULT_RESULTS_DIR.to_string(),
            html_output: DEFAULT_HTML_OUTPUT.to_string(),
            results_json: DEFAULT_RESULTS_JSON.to_string(),
        }
    }
}

impl MarkdownSettings {
    pub fn from_env() -> Self {
        Self {
            max_error_chars: parse_max_error_chars(env::var(ENV_MAX_ERROR_CHARS).ok().as_deref()),
        }
    }

    pub fn defaults() -> Self {
        Self {
            max_error_chars: DEFAULT_MAX_ERROR_CHARS,
        }
    }
}

/// Zero or unparsable values fall back to the default
fn parse_max_error_chars(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|n: &usize| *n > 0)
        .unwrap_or(DEFAULT_MAX_ERROR_CHARS)
}

/// Get the configured error truncation length (convenience function)
pub fn max_error_chars() -> usize {
    get().markdown.max_error_chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_error_chars() {
        assert_eq!(parse_max_error_chars(Some("1200")), 1200);
        assert_eq!(parse_max_error_chars(Some(" 80 ")), 80);
    }

    #[test]
    fn test_parse_max_error_chars_invalid() {
        assert_eq!(parse_max_error_chars(None), DEFAULT_MAX_ERROR_CHARS);
        assert_eq!(parse_max_error_chars(Some("lots")), DEFAULT_MAX_ERROR_CHARS);
        assert_eq!(parse_max_error_chars(Some("0")), DEFAULT_MAX_ERROR_CHARS);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert_eq!(config.paths.results_dir, DEFAULT_RESULTS_DIR);
        assert_eq!(config.paths.html_output, DEFAULT_HTML_OUTPUT);
        assert_eq!(config.paths.results_json, DEFAULT_RESULTS_JSON);
        assert_eq!(config.markdown.max_error_chars, 500);
    }
}
