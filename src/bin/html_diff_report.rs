//! Standalone HTML diff report: `html_diff_report [OUTPUT]`.
//!
//! Scans the configured results directory (default `test-results`) and always
//! exits 0 when the report was written, however many failures it contains.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use visual_report::config;
use visual_report::{logging, write_html_report};

#[derive(Parser, Debug)]
#[command(name = "html_diff_report", about = "Generate an HTML report of visual regression diffs")]
struct Args {
    /// Output file (default: visual-diffs.html)
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(false);

    let cfg = config::get();
    let output = args.output.unwrap_or_else(|| PathBuf::from(&cfg.paths.html_output));

    let outcome = write_html_report(&PathBuf::from(&cfg.paths.results_dir), &output)?;
    println!("{}", outcome.summary_line());

    Ok(())
}
