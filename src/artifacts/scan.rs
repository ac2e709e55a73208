//! Results-directory scanning and retry deduplication.
//!
//! The test runner writes one directory per failed test attempt, e.g.
//! `visual-regression-Visual-R-Homepage-homepage-dark-mode-mobile-chromium-retry1/`,
//! holding `<name>-diff.png`, `<name>-actual.png` and `<name>-expected.png`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::artifacts::types::{TestImageTriple, Viewport};
use crate::report::types::{ReportError, ReportResult};

const DIFF_SUFFIX: &str = "-diff.png";
const ACTUAL_SUFFIX: &str = "-actual.png";
const EXPECTED_SUFFIX: &str = "-expected.png";

static DIR_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Visual-R-\w+-(.*?)-(desktop|mobile)-chromium").expect("valid dir name pattern")
});

/// Recover the test title and viewport from an artifact directory name.
///
/// Names that don't follow the runner's convention are used verbatim as the title.
pub fn parse_dir_name(dir_name: &str) -> (String, Viewport) {
    let title = DIR_NAME_PATTERN
        .captures(dir_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace('-', " "))
        .unwrap_or_else(|| dir_name.to_string());

    (title, Viewport::from_dir_name(dir_name))
}

/// Find every complete diff/actual/expected triple under `results_dir`.
///
/// A missing directory yields an empty list. Subdirectories missing any of the
/// three images are skipped. Retries of the same test are collapsed, see
/// [`dedupe_triples`]. Listing failures carry the path that failed.
pub fn find_test_images(results_dir: &Path) -> ReportResult<Vec<TestImageTriple>> {
    if !results_dir.exists() {
        debug!(dir = %results_dir.display(), "results directory not found");
        return Ok(Vec::new());
    }

    let mut dirs: Vec<OsString> = Vec::new();
    for entry in fs::read_dir(results_dir).map_err(|e| ReportError::io(results_dir, e))? {
        let entry = entry.map_err(|e| ReportError::io(results_dir, e))?;
        let path = entry.path();
        if fs::metadata(&path).map_err(|e| ReportError::io(&path, e))?.is_dir() {
            dirs.push(entry.file_name());
        }
    }
    // read_dir order is platform dependent
    dirs.sort();

    let mut found = Vec::new();
    for dir in dirs {
        let dir_path = results_dir.join(&dir);
        match match_triple(&dir_path, &dir.to_string_lossy())? {
            Some(triple) => found.push(triple),
            None => debug!(dir = %dir_path.display(), "incomplete artifacts, skipping"),
        }
    }

    Ok(dedupe_triples(found))
}

/// Build a triple from one artifact directory if all three images are present.
///
/// `dir_name` is only used for the title and retry check; paths keep the
/// on-disk name.
fn match_triple(dir_path: &Path, dir_name: &str) -> ReportResult<Option<TestImageTriple>> {
    let mut files: Vec<OsString> = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(|e| ReportError::io(dir_path, e))? {
        files.push(entry.map_err(|e| ReportError::io(dir_path, e))?.file_name());
    }
    files.sort();

    let find = |suffix: &str| files.iter().find(|f| f.to_string_lossy().ends_with(suffix));

    let (Some(diff), Some(actual), Some(expected)) =
        (find(DIFF_SUFFIX), find(ACTUAL_SUFFIX), find(EXPECTED_SUFFIX))
    else {
        return Ok(None);
    };

    let (title, viewport) = parse_dir_name(dir_name);

    Ok(Some(TestImageTriple {
        title,
        viewport,
        source_dir: dir_name.to_string(),
        diff_path: dir_path.join(diff),
        actual_path: dir_path.join(actual),
        expected_path: dir_path.join(expected),
    }))
}

/// Collapse triples sharing a `(title, viewport)` key.
///
/// The stored entry is replaced only while it comes from a retry directory, so
/// a clean run wins over any retry and the last-seen retry wins over earlier
/// ones. Output keeps the order in which each key was first seen.
pub fn dedupe_triples(triples: impl IntoIterator<Item = TestImageTriple>) -> Vec<TestImageTriple> {
    let mut slots: HashMap<(String, Viewport), usize> = HashMap::new();
    let mut unique: Vec<TestImageTriple> = Vec::new();

    for triple in triples {
        let key = (triple.title.clone(), triple.viewport);
        match slots.get(&key) {
            None => {
                slots.insert(key, unique.len());
                unique.push(triple);
            }
            Some(&slot) if unique[slot].is_retry() => {
                debug!(
                    replaced = %unique[slot].source_dir,
                    with = %triple.source_dir,
                    "replacing retry artifacts"
                );
                unique[slot] = triple;
            }
            Some(&slot) => {
                debug!(
                    kept = %unique[slot].source_dir,
                    ignored = %triple.source_dir,
                    "keeping clean-run artifacts"
                );
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn triple(title: &str, viewport: Viewport, source_dir: &str) -> TestImageTriple {
        let dir = PathBuf::from(source_dir);
        TestImageTriple {
            title: title.to_string(),
            viewport,
            source_dir: source_dir.to_string(),
            diff_path: dir.join("a-diff.png"),
            actual_path: dir.join("a-actual.png"),
            expected_path: dir.join("a-expected.png"),
        }
    }

    #[test]
    fn test_parse_dir_name_matches_convention() {
        let (title, viewport) =
            parse_dir_name("visual-regression-Visual-R-Homepage-homepage-dark-mode-mobile-chromium");
        assert_eq!(title, "homepage dark mode");
        assert_eq!(viewport, Viewport::Mobile);
    }

    #[test]
    fn test_parse_dir_name_retry_suffix() {
        let (title, viewport) = parse_dir_name(
            "visual-regression-Visual-R-Homepage-homepage-light-mode-desktop-chromium-retry2",
        );
        assert_eq!(title, "homepage light mode");
        assert_eq!(viewport, Viewport::Desktop);
    }

    #[test]
    fn test_parse_dir_name_fallback_is_verbatim() {
        let (title, viewport) = parse_dir_name("some-unrelated-dir-mobile");
        assert_eq!(title, "some-unrelated-dir-mobile");
        assert_eq!(viewport, Viewport::Mobile);
    }

    #[test]
    fn test_dedupe_prefers_clean_run_seen_first() {
        let out = dedupe_triples(vec![
            triple("home", Viewport::Desktop, "home-desktop"),
            triple("home", Viewport::Desktop, "home-desktop-retry1"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source_dir, "home-desktop");
    }

    #[test]
    fn test_dedupe_prefers_clean_run_seen_last() {
        let out = dedupe_triples(vec![
            triple("home", Viewport::Desktop, "home-desktop-retry1"),
            triple("home", Viewport::Desktop, "home-desktop"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source_dir, "home-desktop");
    }

    #[test]
    fn test_dedupe_last_retry_wins() {
        let out = dedupe_triples(vec![
            triple("home", Viewport::Mobile, "home-mobile-retry1"),
            triple("home", Viewport::Mobile, "home-mobile-retry2"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source_dir, "home-mobile-retry2");
    }

    #[test]
    fn test_dedupe_keeps_first_seen_order() {
        let out = dedupe_triples(vec![
            triple("b", Viewport::Desktop, "b-desktop-retry1"),
            triple("a", Viewport::Desktop, "a-desktop"),
            triple("b", Viewport::Desktop, "b-desktop"),
            triple("b", Viewport::Mobile, "b-mobile"),
        ]);
        let keys: Vec<_> = out.iter().map(|t| t.source_dir.as_str()).collect();
        assert_eq!(keys, vec!["b-desktop", "a-desktop", "b-mobile"]);
    }
}
