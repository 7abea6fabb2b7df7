//! Configuration discovery and effective settings resolution.
//!
//! The comparator reads `comparator.toml|yaml|yml` from the working directory
//! (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `reference_report_name`: `reference.json`
//! - `latest_report_name`: `latest.json`
//! - `threshold`: 1
//! - `acceptance_criteria`: 1.0 (percent)
//! - `output`: `human`
//! - `parallel`: false
//!
//! `report_directory` has no default. Overrides precedence: CLI > config file > defaults.

use crate::compare::CompareSettings;
use crate::error::CompareError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_REFERENCE_REPORT_NAME: &str = "reference.json";
pub const DEFAULT_LATEST_REPORT_NAME: &str = "latest.json";
pub const DEFAULT_THRESHOLD: u64 = 1;
pub const DEFAULT_ACCEPTANCE_CRITERIA: f64 = 1.0;

const CONFIG_FILES: [&str; 3] = ["comparator.toml", "comparator.yaml", "comparator.yml"];

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
/// Root configuration loaded from `comparator.toml|yaml`.
pub struct ComparatorConfig {
    /// Relative paths resolve against the config file's directory.
    pub report_directory: Option<String>,
    pub reference_report_name: Option<String>,
    pub latest_report_name: Option<String>,
    pub threshold: Option<u64>,
    pub acceptance_criteria: Option<f64>,
    pub output: Option<String>,
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the binary after applying precedence.
pub struct Effective {
    pub config_root: PathBuf,
    pub config_found: bool,
    pub report_directory: PathBuf,
    pub reference_report_name: String,
    pub latest_report_name: String,
    pub threshold: u64,
    pub acceptance_criteria: f64,
    pub output: String,
    pub parallel: bool,
}

impl Effective {
    pub fn compare_settings(&self) -> CompareSettings {
        CompareSettings {
            reference_report_name: self.reference_report_name.clone(),
            latest_report_name: self.latest_report_name.clone(),
            threshold: self.threshold,
        }
    }
}

/// Walk upward from `start` to find the directory holding the config.
///
/// Stops at a `comparator.toml|yaml|yml` or a `.git` directory; falls back to `start`.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ComparatorConfig` from `root` if a config file is present.
///
/// A file that exists but does not parse is an error.
pub fn load_config(root: &Path) -> Result<Option<ComparatorConfig>, CompareError> {
    let toml_path = root.join(CONFIG_FILES[0]);
    if toml_path.exists() {
        let s = read_config(&toml_path)?;
        let cfg = toml::from_str(&s).map_err(|e| invalid(&toml_path, e))?;
        return Ok(Some(cfg));
    }
    for yml in &CONFIG_FILES[1..] {
        let p = root.join(yml);
        if p.exists() {
            let s = read_config(&p)?;
            let cfg = serde_yaml::from_str(&s).map_err(|e| invalid(&p, e))?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

fn read_config(path: &Path) -> Result<String, CompareError> {
    fs::read_to_string(path).map_err(|e| invalid(path, e))
}

fn invalid(path: &Path, e: impl std::fmt::Display) -> CompareError {
    CompareError::Config(format!("{}: {}", path.to_string_lossy(), e))
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
#[allow(clippy::too_many_arguments)]
pub fn resolve_effective(
    start: &Path,
    cli_report_directory: Option<&str>,
    cli_reference_report_name: Option<&str>,
    cli_latest_report_name: Option<&str>,
    cli_threshold: Option<u64>,
    cli_acceptance_criteria: Option<f64>,
    cli_output: Option<&str>,
    cli_parallel: Option<bool>,
) -> Result<Effective, CompareError> {
    let config_root = detect_config_root(start);
    let loaded = load_config(&config_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let report_directory = match (cli_report_directory, cfg.report_directory.as_deref()) {
        (Some(dir), _) => PathBuf::from(dir),
        (None, Some(dir)) => config_root.join(dir),
        (None, None) => {
            return Err(CompareError::Config(
                "report directory is not configured. Pass --report-directory or add comparator.toml."
                    .into(),
            ))
        }
    };

    let reference_report_name = cli_reference_report_name
        .map(|s| s.to_string())
        .or(cfg.reference_report_name)
        .unwrap_or_else(|| DEFAULT_REFERENCE_REPORT_NAME.to_string());
    let latest_report_name = cli_latest_report_name
        .map(|s| s.to_string())
        .or(cfg.latest_report_name)
        .unwrap_or_else(|| DEFAULT_LATEST_REPORT_NAME.to_string());
    if reference_report_name.trim().is_empty() || latest_report_name.trim().is_empty() {
        return Err(CompareError::Config("report file names must not be empty".into()));
    }

    let threshold = cli_threshold.or(cfg.threshold).unwrap_or(DEFAULT_THRESHOLD);

    let acceptance_criteria = cli_acceptance_criteria
        .or(cfg.acceptance_criteria)
        .unwrap_or(DEFAULT_ACCEPTANCE_CRITERIA);
    if !acceptance_criteria.is_finite() || acceptance_criteria < 0.0 {
        return Err(CompareError::Config(format!(
            "acceptance criteria must be a non-negative percentage, got {}",
            acceptance_criteria
        )));
    }

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(CompareError::Config(format!(
            "output mode must be human or json, got '{}'",
            output
        )));
    }

    let parallel = cli_parallel.or(cfg.parallel).unwrap_or(false);

    Ok(Effective {
        config_root,
        config_found,
        report_directory,
        reference_report_name,
        latest_report_name,
        threshold,
        acceptance_criteria,
        output,
        parallel,
    })
}
