//! Validation report: the notice aggregates of one run, keyed by code.
//!
//! Comparison predicates used by the per-dataset comparator:
//! - `==`: same codes and equal aggregates for every code.
//! - `has_same_error_codes`: same set of error-level codes.
//! - `new_error_count`: notices of error codes present only in the latest run.

use crate::error::CompareError;
use crate::models::notice::NoticeAggregate;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct RawReport {
    notices: Vec<NoticeAggregate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Parsed report. Codes are unique; order in the source document is not kept.
pub struct ValidationReport {
    notices: BTreeMap<String, NoticeAggregate>,
}

impl ValidationReport {
    /// Load a report from disk.
    ///
    /// A missing or unreadable file yields `NotFound`; a document that does not
    /// decode (or lists a code twice) yields `MalformedReport`.
    pub fn parse(path: &Path) -> Result<Self, CompareError> {
        let data = fs::read_to_string(path).map_err(|source| CompareError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data).map_err(|reason| CompareError::MalformedReport {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Decode a report from JSON text. The error is a human-readable reason.
    pub fn from_json_str(data: &str) -> Result<Self, String> {
        let raw: RawReport = serde_json::from_str(data).map_err(|e| e.to_string())?;
        Self::from_notices(raw.notices)
    }

    /// Build a report, rejecting duplicate codes.
    pub fn from_notices<I>(notices: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = NoticeAggregate>,
    {
        let mut map = BTreeMap::new();
        for n in notices {
            if map.contains_key(n.code()) {
                return Err(format!("duplicate notice code '{}'", n.code()));
            }
            map.insert(n.code().to_string(), n);
        }
        Ok(Self { notices: map })
    }

    pub fn get(&self, code: &str) -> Option<&NoticeAggregate> {
        self.notices.get(code)
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Codes whose aggregate is error-level.
    pub fn error_codes(&self) -> BTreeSet<&str> {
        self.notices
            .values()
            .filter(|n| n.is_error())
            .map(|n| n.code())
            .collect()
    }

    pub fn has_same_error_codes(&self, other: &ValidationReport) -> bool {
        self.error_codes() == other.error_codes()
    }

    /// Total notices of error codes in `latest` that are not error codes here.
    ///
    /// `self` is the reference report. Not symmetric. Saturates at `u64::MAX`.
    pub fn new_error_count(&self, latest: &ValidationReport) -> u64 {
        let known = self.error_codes();
        latest
            .notices
            .values()
            .filter(|n| n.is_error() && !known.contains(n.code()))
            .fold(0u64, |acc, n| acc.saturating_add(n.total_notices()))
    }
}
