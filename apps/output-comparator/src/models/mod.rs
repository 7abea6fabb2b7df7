//! Data models for reports, per-dataset outcomes, and the batch summary.

pub mod notice;
pub mod report;

use serde::Serialize;
use std::collections::BTreeMap;

/// Result of comparing the two reports of one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Reports are structurally equal.
    Unchanged,
    /// Reports differ, but not in their set of error codes.
    SameErrorCodes,
    /// Error codes changed. `bad` is `new_errors >= threshold`.
    Regressed { new_errors: u64, bad: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetOutcome {
    pub dataset: String,
    pub classification: Classification,
}

/// Acceptance decision of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    pub fn exit_code(self) -> i32 {
        match self {
            Decision::Accepted => 0,
            Decision::Rejected => 2,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Accumulated outcomes of one batch run.
pub struct BatchSummary {
    /// Dataset name -> new error count, only for regressed datasets.
    pub new_errors: BTreeMap<String, u64>,
    pub bad_datasets: usize,
    pub total_datasets: usize,
    pub unchanged: usize,
    pub same_error_codes: usize,
}

impl BatchSummary {
    /// Fold one dataset outcome into the summary.
    pub fn record(&mut self, outcome: DatasetOutcome) {
        self.total_datasets += 1;
        match outcome.classification {
            Classification::Unchanged => self.unchanged += 1,
            Classification::SameErrorCodes => self.same_error_codes += 1,
            Classification::Regressed { new_errors, bad } => {
                self.new_errors.insert(outcome.dataset, new_errors);
                if bad {
                    self.bad_datasets += 1;
                }
            }
        }
    }

    /// Share of bad datasets, in percent.
    pub fn percent_invalid(&self) -> f64 {
        if self.total_datasets == 0 {
            return 0.0;
        }
        100.0 * self.bad_datasets as f64 / self.total_datasets as f64
    }

    /// `Rejected` when the share of bad datasets reaches `acceptance_criteria`.
    pub fn decision(&self, acceptance_criteria: f64) -> Decision {
        if self.percent_invalid() >= acceptance_criteria {
            Decision::Rejected
        } else {
            Decision::Accepted
        }
    }
}
