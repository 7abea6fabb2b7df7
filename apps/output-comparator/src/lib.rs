//! output-comparator core library.
//!
//! Compares a reference and a latest validation report for every dataset
//! under a report directory, and decides whether the latest validator
//! introduces too many new error notices.
//!
//! High-level modules:
//! - `models`: Notice aggregates, validation reports, outcomes, batch summary.
//! - `compare`: Per-dataset comparison and classification.
//! - `batch`: Dataset discovery and accumulation over a whole run.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `output`: Integration report writer and summary printers.
//! - `error`: Fatal error taxonomy and exit status.
//! - `utils`: Supporting helpers.
pub mod batch;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod utils;
