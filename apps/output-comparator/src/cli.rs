//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "output-comparator",
    version,
    about = "Compare reference and latest validation reports across datasets",
    long_about = "output-comparator — compares two generations of validation reports per dataset and decides whether the latest validator introduces too many new errors.\n\nConfiguration precedence: CLI > comparator.toml > defaults.",
    after_help = "Examples:\n  output-comparator compare --report-directory out/\n  output-comparator compare --report-directory out/ --threshold 5 --acceptance-criteria 2.5\n  output-comparator compare --output json --parallel",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current output-comparator version."
    )]
    Version,
    /// Compare reports of every dataset under a directory
    #[command(
        about = "Compare validation reports",
        long_about = "For every dataset directory, compare the reference and latest reports, write integration_report.json into the report directory, and exit 2 when the share of bad datasets reaches the acceptance criteria.",
        after_help = "Exit status:\n  0  accepted\n  1  fatal error (missing or malformed report, no datasets, invalid configuration)\n  2  rejected"
    )]
    Compare {
        #[arg(long, help = "Directory whose subdirectories are the datasets")]
        report_directory: Option<String>,
        #[arg(long, help = "File name of the reference report (default: reference.json)")]
        reference_report_name: Option<String>,
        #[arg(long, help = "File name of the latest report (default: latest.json)")]
        latest_report_name: Option<String>,
        #[arg(long, help = "New error notices at which a dataset is bad (default: 1)")]
        threshold: Option<u64>,
        #[arg(long, help = "Percent of bad datasets at which the run is rejected (default: 1.0)")]
        acceptance_criteria: Option<f64>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Compare datasets in parallel")]
        parallel: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Log the outcome of every dataset")]
        verbose: bool,
    },
}
