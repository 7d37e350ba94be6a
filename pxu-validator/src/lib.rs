//! # pxu-validator
//!
//! Batch validation of provider file units, with reporting.
//!
//! This crate separates the **core validation pass** (input-agnostic, see
//! [`validate_units`]) from the **manifest source** that loads already-resolved
//! file-unit records from JSON or YAML files (see [`validate_manifests`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use pxu::Severity;
//! use pxu_validator::{ManifestSourceConfig, ValidationConfig, validate_manifests};
//!
//! let mut source = ManifestSourceConfig::default();
//! source.paths = vec![PathBuf::from("build/units.json")];
//!
//! let mut config = ValidationConfig::default();
//! config.fail_on = Severity::Warning;
//!
//! let report = validate_manifests(&source, &config).unwrap();
//! println!("Units checked: {}", report.checked_units);
//! println!("Issues: {}", report.issues_count());
//! println!("Load errors: {}", report.load_errors.len());
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
mod manifest;
pub mod output;
mod report;

use std::fmt::Display;
use std::path::Path;

use pxu::{Unit, check_unit};
use tracing::{debug, info};

pub use config::{ManifestSourceConfig, ValidationConfig};
pub use error::{LoadError, LoadErrorKind, UnitIssue};
pub use report::ValidationReport;

use manifest::{load_units, manifest_format_for, parse_manifest, read_manifest_bounded};

/// Validate units that are already in memory.
///
/// Issues below `config.min_severity` are left out of the report; the report
/// is ok when no remaining issue reaches `config.fail_on`.
#[must_use]
pub fn validate_units<'a, U, I>(units: I, config: &ValidationConfig) -> ValidationReport
where
    U: Unit + Display + 'a,
    I: IntoIterator<Item = &'a U>,
{
    let mut issues = Vec::new();
    let mut checked_units = 0;
    for unit in units {
        collect_issues(unit, None, config, &mut issues);
        checked_units += 1;
    }
    ValidationReport::new(checked_units, 0, issues, Vec::new(), config.fail_on)
}

/// Validate the file units listed in manifests on disk.
///
/// # Arguments
///
/// * `source` - Manifest source options (paths, max file size, unit limit)
/// * `config` - Core validation config (reporting and failure thresholds)
///
/// # Errors
///
/// Returns an error if `source.paths` is empty or if any provided path does not exist.
/// Manifests that cannot be read or parsed, and records that are not valid file units,
/// are reported in `report.load_errors` and never silently discarded.
pub fn validate_manifests(
    source: &ManifestSourceConfig,
    config: &ValidationConfig,
) -> anyhow::Result<ValidationReport> {
    if source.paths.is_empty() {
        anyhow::bail!("No manifests provided for validation");
    }

    for path in &source.paths {
        if !path.exists() {
            anyhow::bail!("Manifest does not exist: {}", path.display());
        }
    }

    let mut issues = Vec::new();
    let mut load_errors = Vec::new();
    let mut checked_units: usize = 0;

    for path in &source.paths {
        let records = match load_records(path, source.max_file_size) {
            Ok(records) => records,
            Err(err) => {
                load_errors.push(err);
                continue;
            }
        };

        let (units, record_errors) = load_units(&records, path);
        load_errors.extend(record_errors);

        let remaining = source.max_units.saturating_sub(checked_units);
        for unit in units.iter().take(remaining) {
            collect_issues(unit, Some(path), config, &mut issues);
            checked_units += 1;
        }
        debug!(manifest = %path.display(), units = units.len(), "manifest checked");

        if units.len() > remaining {
            load_errors.push(LoadError::new(
                path.clone(),
                LoadErrorKind::LimitExceeded,
                format!(
                    "Validation aborted: max_units limit ({}) reached; remaining units not checked",
                    source.max_units
                ),
            ));
            break;
        }
    }

    let failed_records = load_errors
        .iter()
        .filter(|err| err.kind == LoadErrorKind::InvalidRecord)
        .count();
    let report = ValidationReport::new(
        checked_units,
        failed_records,
        issues,
        load_errors,
        config.fail_on,
    );
    info!(
        checked = report.checked_units,
        issues = report.issues_count(),
        load_errors = report.load_errors.len(),
        ok = report.ok,
        "validation finished"
    );
    Ok(report)
}

fn load_records(path: &Path, max_file_size: u64) -> Result<Vec<serde_json::Value>, LoadError> {
    let Some(format) = manifest_format_for(path) else {
        return Err(LoadError::new(
            path.to_owned(),
            LoadErrorKind::UnsupportedFormat,
            "Manifest must be a .json, .yaml or .yml file",
        ));
    };
    let content = read_manifest_bounded(path, max_file_size)?;
    parse_manifest(&content, path, format)
}

fn collect_issues<U: Unit + Display>(
    unit: &U,
    file: Option<&Path>,
    config: &ValidationConfig,
    issues: &mut Vec<UnitIssue>,
) {
    let found = check_unit(unit)
        .into_iter()
        .filter(|issue| issue.severity.at_least(config.min_severity));
    for issue in found {
        issues.push(UnitIssue {
            file: file.map(Path::to_path_buf),
            unit: unit.to_string(),
            issue,
        });
    }
}
