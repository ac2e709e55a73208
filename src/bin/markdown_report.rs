//! Standalone Markdown report: `markdown_report [RESULTS_JSON] [--output PATH]`.
//!
//! Prints the report, or writes it and prints a confirmation. Never both.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use visual_report::config;
use visual_report::report::deliver_report;
use visual_report::{MarkdownOptions, generate_markdown_report, logging};

#[derive(Parser, Debug)]
#[command(name = "markdown_report", about = "Generate a Markdown report from visual test results")]
struct Args {
    /// JSON results file (default: test-results/results.json)
    results: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(false);

    let results = args
        .results
        .unwrap_or_else(|| PathBuf::from(&config::get().paths.results_json));

    let report = generate_markdown_report(&results, &MarkdownOptions::default())?;

    println!("{}", deliver_report(&report, args.output.as_deref())?);

    Ok(())
}
