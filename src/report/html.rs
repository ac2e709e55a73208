//! Self-contained HTML diff report.
//!
//! Every screenshot is inlined as a base64 data URI so the file can be opened
//! straight out of a CI artifact download.

use base64::Engine;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use crate::artifacts::{TestImageTriple, find_test_images};
use crate::report::types::{HtmlReportOutcome, ReportError, ReportResult};

/// Panel order, label, label class and alt text. Diff/Actual/Expected order is fixed.
const PANELS: [(&str, &str, &str); 3] = [
    ("Diff (changes highlighted)", "image-label diff-label", "Diff"),
    ("Actual (current)", "image-label", "Actual"),
    ("Expected (baseline)", "image-label expected-label", "Expected"),
];

const STYLE: &str = r#"    * {
      margin: 0;
      padding: 0;
      box-sizing: border-box;
    }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
      background: #0d1117;
      color: #c9d1d9;
      padding: 2rem;
      line-height: 1.6;
    }
    .container {
      max-width: 1400px;
      margin: 0 auto;
    }
    h1 {
      color: #f85149;
      margin-bottom: 0.5rem;
    }
    .subtitle {
      color: #8b949e;
      margin-bottom: 2rem;
    }
    .test-case {
      background: #161b22;
      border: 1px solid #30363d;
      border-radius: 6px;
      padding: 1.5rem;
      margin-bottom: 2rem;
    }
    .test-header {
      display: flex;
      align-items: center;
      gap: 1rem;
      margin-bottom: 1rem;
      padding-bottom: 1rem;
      border-bottom: 1px solid #30363d;
    }
    .test-title {
      font-size: 1.25rem;
      font-weight: 600;
      color: #f85149;
      flex: 1;
    }
    .viewport-badge {
      background: #238636;
      color: white;
      padding: 0.25rem 0.75rem;
      border-radius: 12px;
      font-size: 0.875rem;
      font-weight: 500;
    }
    .images {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(400px, 1fr));
      gap: 1rem;
    }
    .image-container {
      background: #0d1117;
      border: 1px solid #30363d;
      border-radius: 6px;
      padding: 1rem;
    }
    .image-label {
      font-weight: 600;
      margin-bottom: 0.5rem;
      color: #58a6ff;
      text-transform: uppercase;
      font-size: 0.875rem;
      letter-spacing: 0.5px;
    }
    .diff-label {
      color: #f85149;
    }
    .expected-label {
      color: #3fb950;
    }
    .image-meta {
      color: #8b949e;
      font-size: 0.75rem;
      margin-top: 0.5rem;
    }
    img {
      width: 100%;
      height: auto;
      display: block;
      border-radius: 4px;
      border: 1px solid #30363d;
    }
    .no-failures {
      text-align: center;
      padding: 4rem 2rem;
      color: #3fb950;
      font-size: 1.5rem;
    }
"#;

/// A screenshot ready to be inlined
struct EmbeddedImage {
    base64: String,
    dimensions: Option<(u32, u32)>,
}

/// Render the report for the given failures.
///
/// All images are read up front; if any of them can't be read the whole
/// render fails and no document is produced.
pub fn render_html(failed: &[TestImageTriple]) -> ReportResult<String> {
    let mut cards = Vec::with_capacity(failed.len());
    for test in failed {
        let [diff, actual, expected] = test.image_paths();
        let images = [embed_image(diff)?, embed_image(actual)?, embed_image(expected)?];
        cards.push(render_card(test, &images));
    }

    let count = failed.len();
    let body = if cards.is_empty() {
        r#"<div class="no-failures">✅ No visual regression failures</div>"#.to_string()
    } else {
        cards.join("\n")
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("  <title>Visual Regression Failures</title>\n");
    html.push_str("  <style>\n");
    html.push_str(STYLE);
    html.push_str("  </style>\n</head>\n<body>\n  <div class=\"container\">\n");
    html.push_str("    <h1>❌ Visual Regression Failures</h1>\n");
    html.push_str(&format!(
        "    <p class=\"subtitle\">{} test{} failed visual regression checks</p>\n\n    ",
        count,
        if count == 1 { "" } else { "s" }
    ));
    html.push_str(&body);
    html.push_str("\n  </div>\n</body>\n</html>");

    Ok(html)
}

fn render_card(test: &TestImageTriple, images: &[EmbeddedImage; 3]) -> String {
    let mut card = format!(
        r#"
    <div class="test-case">
      <div class="test-header">
        <div class="test-title">{}</div>
        <div class="viewport-badge">{}</div>
      </div>
      <div class="images">"#,
        escape_html(&test.title),
        escape_html(&test.viewport.project_name()),
    );

    for ((label, label_class, alt), image) in PANELS.iter().zip(images) {
        let meta = image
            .dimensions
            .map(|(w, h)| format!("\n          <div class=\"image-meta\">{} × {}</div>", w, h))
            .unwrap_or_default();
        card.push_str(&format!(
            r#"
        <div class="image-container">
          <div class="{}">{}</div>
          <img src="data:image/png;base64,{}" alt="{}">{}
        </div>"#,
            label_class, label, image.base64, alt, meta
        ));
    }

    card.push_str("\n      </div>\n    </div>");
    card
}

fn embed_image(path: &Path) -> ReportResult<EmbeddedImage> {
    let bytes = fs::read(path).map_err(|e| ReportError::io(path, e))?;
    let dimensions = image_dimensions(&bytes);
    if dimensions.is_none() {
        debug!(path = %path.display(), "could not decode image header");
    }

    Ok(EmbeddedImage {
        base64: base64::engine::general_purpose::STANDARD.encode(&bytes),
        dimensions,
    })
}

/// Width and height from the image header, if the bytes are a known format
fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Scan `results_dir`, render the report and write it to `output_path`,
/// replacing any existing file.
pub fn write_html_report(results_dir: &Path, output_path: &Path) -> ReportResult<HtmlReportOutcome> {
    let failed = find_test_images(results_dir)?;
    info!(count = failed.len(), dir = %results_dir.display(), "matched failed screenshots");

    let html = render_html(&failed)?;
    fs::write(output_path, &html).map_err(|e| ReportError::io(output_path, e))?;

    Ok(HtmlReportOutcome {
        output_path: output_path.to_path_buf(),
        failures: failed.len(),
        source_dirs: failed.into_iter().map(|t| t.source_dir).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::Viewport;
    use std::path::PathBuf;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_html("homepage dark mode"), "homepage dark mode");
    }

    #[test]
    fn test_render_empty_has_banner() {
        let html = render_html(&[]).unwrap();
        assert!(html.contains("No visual regression failures"));
        assert!(html.contains("0 tests failed visual regression checks"));
        assert!(!html.contains("class=\"test-case\""));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_image_dimensions_rejects_garbage() {
        assert_eq!(image_dimensions(b"not an image"), None);
    }

    #[test]
    fn test_missing_image_fails_render() {
        let test = TestImageTriple {
            title: "gone".to_string(),
            viewport: Viewport::Desktop,
            source_dir: "gone-desktop".to_string(),
            diff_path: PathBuf::from("/nonexistent/gone-diff.png"),
            actual_path: PathBuf::from("/nonexistent/gone-actual.png"),
            expected_path: PathBuf::from("/nonexistent/gone-expected.png"),
        };

        let err = render_html(&[test]).unwrap_err();
        match err {
            ReportError::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/gone-diff.png")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
