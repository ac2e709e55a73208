// Core types for matched screenshot artifacts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Viewport a visual test ran under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Desktop,
    Mobile,
}

impl Viewport {
    /// Derive the viewport from an artifact directory name
    pub fn from_dir_name(name: &str) -> Self {
        if name.contains("mobile") {
            Viewport::Mobile
        } else {
            Viewport::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Viewport::Desktop => "desktop",
            Viewport::Mobile => "mobile",
        }
    }

    /// Test-runner project name for this viewport (e.g. "mobile-chromium")
    pub fn project_name(&self) -> String {
        format!("{}-chromium", self.as_str())
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three screenshots captured for one failed visual test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestImageTriple {
    /// Human-readable test title
    pub title: String,

    /// Viewport the screenshots were taken at
    pub viewport: Viewport,

    /// Name of the artifact directory the triple was read from
    pub source_dir: String,

    /// Highlighted difference image
    pub diff_path: PathBuf,

    /// What the test captured
    pub actual_path: PathBuf,

    /// The stored baseline
    pub expected_path: PathBuf,
}

impl TestImageTriple {
    /// Whether this triple came from a retry attempt
    pub fn is_retry(&self) -> bool {
        self.source_dir.contains("retry")
    }

    /// Paths in report order: diff, actual, expected
    pub fn image_paths(&self) -> [&PathBuf; 3] {
        [&self.diff_path, &self.actual_path, &self.expected_path]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_from_dir_name() {
        assert_eq!(
            Viewport::from_dir_name("visual-Visual-R-Homepage-home-mobile-chromium"),
            Viewport::Mobile
        );
        assert_eq!(
            Viewport::from_dir_name("visual-Visual-R-Homepage-home-desktop-chromium"),
            Viewport::Desktop
        );
        assert_eq!(Viewport::from_dir_name("something-else"), Viewport::Desktop);
    }

    #[test]
    fn test_project_name() {
        assert_eq!(Viewport::Desktop.project_name(), "desktop-chromium");
        assert_eq!(Viewport::Mobile.project_name(), "mobile-chromium");
    }
}
