pub mod html;
pub mod markdown;
pub mod types;

pub use html::{render_html, write_html_report};
pub use markdown::{
    MISSING_RESULTS_WARNING, MarkdownOptions, deliver_report, extract_pixel_diff, format_duration,
    generate_markdown_report, render_markdown, render_markdown_with,
};
pub use types::{HtmlReportOutcome, ReportError, ReportResult};
