//! Per-dataset comparison of a reference and a latest validation report.
//!
//! Checks run in a fixed order, each one a distinct gate:
//! 1. equal reports -> `Unchanged`
//! 2. same error codes -> `SameErrorCodes`
//! 3. otherwise the new error count is computed and held against `threshold`.

use crate::error::CompareError;
use crate::models::report::ValidationReport;
use crate::models::{Classification, DatasetOutcome};
use std::path::Path;

#[derive(Debug, Clone)]
/// Inputs shared by every dataset of a run.
pub struct CompareSettings {
    pub reference_report_name: String,
    pub latest_report_name: String,
    /// A dataset with at least this many new error notices is bad.
    pub threshold: u64,
}

/// Classify a pair of reports.
pub fn classify(
    reference: &ValidationReport,
    latest: &ValidationReport,
    threshold: u64,
) -> Classification {
    if reference == latest {
        return Classification::Unchanged;
    }
    if reference.has_same_error_codes(latest) {
        return Classification::SameErrorCodes;
    }
    let new_errors = reference.new_error_count(latest);
    Classification::Regressed {
        new_errors,
        bad: new_errors >= threshold,
    }
}

/// Load both reports of the dataset directory `dir` and classify them.
///
/// The reference report is read first; the first failure is returned.
pub fn compare_dataset(
    dir: &Path,
    settings: &CompareSettings,
) -> Result<DatasetOutcome, CompareError> {
    let reference = ValidationReport::parse(&dir.join(&settings.reference_report_name))?;
    let latest = ValidationReport::parse(&dir.join(&settings.latest_report_name))?;
    Ok(DatasetOutcome {
        dataset: dataset_name(dir),
        classification: classify(&reference, &latest, settings.threshold),
    })
}

/// Dataset name is the directory's final path component.
///
/// Non-UTF-8 names are converted lossily; see [`has_lossy_name`].
pub fn dataset_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.to_string_lossy().to_string())
}

/// True when `dataset_name` cannot represent the directory name exactly.
pub fn has_lossy_name(dir: &Path) -> bool {
    dir.file_name().map_or(true, |n| n.to_str().is_none())
}
