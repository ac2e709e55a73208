use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

use visual_report::config::{self, ENV_HTML_OUTPUT, ENV_RESULTS_DIR, ENV_RESULTS_JSON};
use visual_report::logging;
use visual_report::report::{
    MarkdownOptions, deliver_report, generate_markdown_report, write_html_report,
};

/// Visual Report - summaries of visual regression test runs
#[derive(Parser, Debug)]
#[command(
    name = "visual-report",
    about = "HTML and Markdown reports for visual regression test runs",
    after_help = "ENVIRONMENT VARIABLES:\n\
        VISUAL_REPORT_RESULTS_DIR        Artifact root scanned for screenshots\n\
        VISUAL_REPORT_HTML_OUTPUT        HTML report path\n\
        VISUAL_REPORT_RESULTS_JSON       JSON summary read by the Markdown report\n\
        VISUAL_REPORT_MAX_ERROR_CHARS    Error message truncation length\n\
        RUST_LOG                         Log filter (overrides --verbose)"
)]
struct Args {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a self-contained HTML page comparing failed screenshots
    Html {
        /// Output file (overwritten if it exists)
        #[arg(env = ENV_HTML_OUTPUT, default_value = config::DEFAULT_HTML_OUTPUT)]
        output: PathBuf,

        /// Directory holding one artifact folder per failed test attempt
        #[arg(long, short = 'r', env = ENV_RESULTS_DIR, default_value = config::DEFAULT_RESULTS_DIR)]
        results_dir: PathBuf,

        /// Print the outcome as JSON instead of a summary line
        #[arg(long)]
        json: bool,
    },

    /// Render the runner's JSON summary as Markdown
    Markdown {
        /// Path to the JSON results file
        #[arg(env = ENV_RESULTS_JSON, default_value = config::DEFAULT_RESULTS_JSON)]
        results: PathBuf,

        /// Write the report to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Truncate raw error messages after this many characters
        #[arg(long)]
        max_error_chars: Option<usize>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    match args.command {
        Some(Commands::Html {
            output,
            results_dir,
            json,
        }) => {
            let outcome = write_html_report(&results_dir, &output)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.summary_line());
            }
        }

        Some(Commands::Markdown {
            results,
            output,
            max_error_chars,
        }) => {
            let mut options = MarkdownOptions::default();
            if let Some(max) = max_error_chars {
                options = options.max_error_chars(max);
            }

            let report = generate_markdown_report(&results, &options)?;
            println!("{}", deliver_report(&report, output.as_deref())?);
        }

        None => {
            println!("Visual Report - summaries of visual regression test runs");
            println!();
            println!("Usage: visual-report <COMMAND>");
            println!();
            println!("Commands:");
            println!("  html      Write an HTML page comparing failed screenshots");
            println!("  markdown  Render the runner's JSON summary as Markdown");
            println!();
            println!("Run with --help for more information.");
        }
    }

    Ok(())
}
