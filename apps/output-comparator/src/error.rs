//! Error taxonomy for a comparison run.
//!
//! Every variant is fatal: the batch stops at the first error and the binary
//! exits with [`CompareError::exit_code`]. No report file is written.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status used for every fatal error.
pub const EXIT_FATAL: i32 = 1;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Specified path is not a directory, or an I/O error occurred: {path}")]
    NotADirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Specified directory contains no datasets, cannot generate integration report: {path}")]
    NoDatasets { path: PathBuf },

    #[error("No file found at {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed validation report at {path}: {reason}")]
    MalformedReport { path: PathBuf, reason: String },

    #[error("dataset '{name}': {source}")]
    Dataset {
        name: String,
        #[source]
        source: Box<CompareError>,
    },

    #[error("Failed to write integration report to {path}: {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CompareError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_FATAL
    }

    /// Attach the dataset name to a per-dataset failure.
    pub fn in_dataset(name: impl Into<String>, source: CompareError) -> Self {
        CompareError::Dataset {
            name: name.into(),
            source: Box::new(source),
        }
    }
}
