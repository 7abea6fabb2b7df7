//! Output rendering for a comparison run.
//!
//! - The integration report (`integration_report.json`) is a flat JSON object
//!   mapping dataset name to new error count, written into the report directory.
//! - The summary goes to stdout as one `human` line or a `json` document.

use crate::error::CompareError;
use crate::models::{BatchSummary, Classification, DatasetOutcome, Decision};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::fs;
use std::path::{Path, PathBuf};

pub const INTEGRATION_REPORT_JSON: &str = "integration_report.json";

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::colors_enabled()
}

/// Write the dataset -> new error count map into `report_directory`.
pub fn write_integration_report(
    report_directory: &Path,
    summary: &BatchSummary,
) -> Result<PathBuf, CompareError> {
    let path = report_directory.join(INTEGRATION_REPORT_JSON);
    let body = serde_json::to_string_pretty(&summary.new_errors).map_err(|e| {
        CompareError::WriteReport {
            path: path.clone(),
            source: e.into(),
        }
    })?;
    fs::write(&path, body).map_err(|source| CompareError::WriteReport {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// One-line human summary of a run.
pub fn summary_line(summary: &BatchSummary) -> String {
    format!(
        "{} out of {} datasets (~{:.2} %) are invalid due to new implementation.",
        summary.bad_datasets,
        summary.total_datasets,
        summary.percent_invalid()
    )
}

/// Compose the JSON summary document (pure) for testing/snapshot purposes.
pub fn compose_summary_json(summary: &BatchSummary, decision: Decision) -> JsonVal {
    json!({
        "summary": {
            "bad": summary.bad_datasets,
            "total": summary.total_datasets,
            "percentInvalid": summary.percent_invalid(),
            "unchanged": summary.unchanged,
            "sameErrorCodes": summary.same_error_codes,
            "decision": decision,
        },
        "newErrors": summary.new_errors,
    })
}

/// Print the run summary in the requested format.
pub fn print_summary(summary: &BatchSummary, decision: Decision, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_summary_json(summary, decision)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
        },
        _ => {
            let line = summary_line(summary);
            if use_colors(output) {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

/// Short description of one dataset outcome, used for verbose logging.
pub fn describe_outcome(outcome: &DatasetOutcome) -> String {
    let what = match outcome.classification {
        Classification::Unchanged => "unchanged".to_string(),
        Classification::SameErrorCodes => "same error codes".to_string(),
        Classification::Regressed { new_errors, bad } => format!(
            "{} new error notice(s){}",
            new_errors,
            if bad { ", over threshold" } else { "" }
        ),
    };
    format!("dataset '{}': {}", outcome.dataset, what)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> BatchSummary {
        let mut s = BatchSummary::default();
        s.record(DatasetOutcome {
            dataset: "feed-a".into(),
            classification: Classification::Unchanged,
        });
        s.record(DatasetOutcome {
            dataset: "feed-b".into(),
            classification: Classification::Regressed {
                new_errors: 6,
                bad: true,
            },
        });
        s.record(DatasetOutcome {
            dataset: "feed-c".into(),
            classification: Classification::SameErrorCodes,
        });
        s
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(&sample()),
            "1 out of 3 datasets (~33.33 %) are invalid due to new implementation."
        );
    }

    #[test]
    fn test_compose_summary_json_shape() {
        let out = compose_summary_json(&sample(), Decision::Rejected);
        assert_eq!(out["summary"]["bad"], 1);
        assert_eq!(out["summary"]["total"], 3);
        assert_eq!(out["summary"]["unchanged"], 1);
        assert_eq!(out["summary"]["sameErrorCodes"], 1);
        assert_eq!(out["summary"]["decision"], "rejected");
        assert_eq!(out["newErrors"]["feed-b"], 6);
        assert!(out["newErrors"].get("feed-a").is_none());
    }

    #[test]
    fn test_write_integration_report() {
        let dir = tempdir().unwrap();
        let path = write_integration_report(dir.path(), &sample()).unwrap();
        assert_eq!(path, dir.path().join(INTEGRATION_REPORT_JSON));
        let written: JsonVal = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({"feed-b": 6}));
    }

    #[test]
    fn test_write_integration_report_empty_map() {
        let dir = tempdir().unwrap();
        let path = write_integration_report(dir.path(), &BatchSummary::default()).unwrap();
        let written: JsonVal = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({}));
    }

    #[test]
    fn test_write_integration_report_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let res = write_integration_report(&dir.path().join("gone"), &sample());
        assert!(matches!(res, Err(CompareError::WriteReport { .. })));
    }

    #[test]
    fn test_describe_outcome() {
        let d = describe_outcome(&DatasetOutcome {
            dataset: "x".into(),
            classification: Classification::Regressed {
                new_errors: 2,
                bad: true,
            },
        });
        assert_eq!(d, "dataset 'x': 2 new error notice(s), over threshold");
    }
}
