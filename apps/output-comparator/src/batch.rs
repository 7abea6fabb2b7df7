//! Batch runner over every dataset directory under a report root.
//!
//! Produces a `BatchSummary` or the first error in dataset order. Nothing
//! accumulated before a failure is returned, so callers never write a partial
//! integration report.

use crate::compare::{compare_dataset, dataset_name, CompareSettings};
use crate::error::CompareError;
use crate::models::{BatchSummary, DatasetOutcome};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Immediate subdirectories of `root`, sorted by path.
///
/// Files next to the datasets (e.g. a previous integration report) are skipped.
pub fn list_datasets(root: &Path) -> Result<Vec<PathBuf>, CompareError> {
    let not_a_dir = |source: std::io::Error| CompareError::NotADirectory {
        path: root.to_path_buf(),
        source,
    };
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(not_a_dir)? {
        let path = entry.map_err(not_a_dir)?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    if dirs.is_empty() {
        return Err(CompareError::NoDatasets {
            path: root.to_path_buf(),
        });
    }
    dirs.sort();
    Ok(dirs)
}

/// Compare every dataset, keeping dataset order.
///
/// With `parallel`, comparisons run on the rayon pool; the returned error is
/// still the first one in dataset order. Errors carry the dataset name.
pub fn compare_all(
    datasets: &[PathBuf],
    settings: &CompareSettings,
    parallel: bool,
) -> Result<Vec<DatasetOutcome>, CompareError> {
    if parallel {
        let results: Vec<Result<DatasetOutcome, CompareError>> = datasets
            .par_iter()
            .map(|dir| compare_one(dir, settings))
            .collect();
        results.into_iter().collect()
    } else {
        datasets
            .iter()
            .map(|dir| compare_one(dir, settings))
            .collect()
    }
}

fn compare_one(dir: &Path, settings: &CompareSettings) -> Result<DatasetOutcome, CompareError> {
    compare_dataset(dir, settings).map_err(|e| CompareError::in_dataset(dataset_name(dir), e))
}

pub fn summarize<I>(outcomes: I) -> BatchSummary
where
    I: IntoIterator<Item = DatasetOutcome>,
{
    let mut summary = BatchSummary::default();
    for o in outcomes {
        summary.record(o);
    }
    summary
}

/// List, compare, and summarize all datasets under `root`.
pub fn run_batch(
    root: &Path,
    settings: &CompareSettings,
    parallel: bool,
) -> Result<BatchSummary, CompareError> {
    let datasets = list_datasets(root)?;
    let outcomes = compare_all(&datasets, settings, parallel)?;
    Ok(summarize(outcomes))
}
