//! output-comparator CLI binary entry point.
//! Resolves configuration, runs the batch, and owns the process exit status.

use clap::Parser;
use output_comparator::cli::{Cli, Commands};
use output_comparator::error::CompareError;
use output_comparator::models::Decision;
use output_comparator::{batch, compare, config, output, utils};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Compare {
            report_directory,
            reference_report_name,
            latest_report_name,
            threshold,
            acceptance_criteria,
            output,
            parallel,
            verbose,
        } => {
            let res = run_compare(
                report_directory.as_deref(),
                reference_report_name.as_deref(),
                latest_report_name.as_deref(),
                threshold,
                acceptance_criteria,
                output.as_deref(),
                if parallel { Some(true) } else { None },
                verbose,
            );
            let code = match res {
                Ok(decision) => decision.exit_code(),
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    e.exit_code()
                }
            };
            std::process::exit(code);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_compare(
    report_directory: Option<&str>,
    reference_report_name: Option<&str>,
    latest_report_name: Option<&str>,
    threshold: Option<u64>,
    acceptance_criteria: Option<f64>,
    output_mode: Option<&str>,
    parallel: Option<bool>,
    verbose: bool,
) -> Result<Decision, CompareError> {
    let cwd = std::env::current_dir()
        .map_err(|e| CompareError::Config(format!("cannot read working directory: {}", e)))?;
    let eff = config::resolve_effective(
        &cwd,
        report_directory,
        reference_report_name,
        latest_report_name,
        threshold,
        acceptance_criteria,
        output_mode,
        parallel,
    )?;
    if !eff.config_found && eff.output != "json" {
        eprintln!(
            "{} No comparator.toml found; using defaults.",
            utils::note_prefix()
        );
    }

    let datasets = batch::list_datasets(&eff.report_directory)?;
    for dir in datasets.iter().filter(|d| compare::has_lossy_name(d)) {
        eprintln!(
            "{} Dataset directory name is not valid UTF-8, reported as '{}': {}",
            utils::note_prefix(),
            compare::dataset_name(dir),
            dir.to_string_lossy()
        );
    }
    let outcomes = batch::compare_all(&datasets, &eff.compare_settings(), eff.parallel)?;
    if verbose {
        for o in &outcomes {
            eprintln!("{} {}", utils::info_prefix(), output::describe_outcome(o));
        }
    }
    let summary = batch::summarize(outcomes);

    let written = output::write_integration_report(&eff.report_directory, &summary)?;
    if verbose {
        eprintln!(
            "{} Integration report written to {}",
            utils::info_prefix(),
            written.to_string_lossy()
        );
    }
    let decision = summary.decision(eff.acceptance_criteria);
    output::print_summary(&summary, decision, &eff.output);
    Ok(decision)
}
