//! Validation report types.

use pxu::Severity;
use serde::Serialize;

use crate::error::{LoadError, UnitIssue};

/// Result of a validation run.
///
/// CI pipelines must check both `issues` and `load_errors`.
/// A non-empty `load_errors` means some records were never validated;
/// treat this as a build failure regardless of `issues`.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Number of units that were validated.
    pub checked_units: usize,
    /// Number of records that could not be turned into units.
    ///
    /// Manifest-level failures and the unit limit are not records; they show
    /// up in `load_errors` only.
    pub failed_records: usize,
    /// Whether no reported issue reached the failure threshold AND no load errors occurred.
    pub ok: bool,
    /// Issues found on validated units, at or above the reporting threshold.
    pub issues: Vec<UnitIssue>,
    /// Load-level errors: manifests or records that could not be validated.
    pub load_errors: Vec<LoadError>,
}

impl ValidationReport {
    pub(crate) fn new(
        checked_units: usize,
        failed_records: usize,
        issues: Vec<UnitIssue>,
        load_errors: Vec<LoadError>,
        fail_on: Severity,
    ) -> Self {
        let ok = load_errors.is_empty()
            && !issues
                .iter()
                .any(|unit_issue| unit_issue.issue.severity.at_least(fail_on));
        Self {
            checked_units,
            failed_records,
            ok,
            issues,
            load_errors,
        }
    }

    /// Total number of records attempted (checked + failed).
    ///
    /// Records in a manifest that failed as a whole, and records past the
    /// unit limit, were never attempted.
    #[must_use]
    pub fn records_attempted(&self) -> usize {
        self.checked_units + self.failed_records
    }

    /// Number of issues found.
    #[must_use]
    pub fn issues_count(&self) -> usize {
        self.issues.len()
    }

    /// Number of issues with the given severity.
    #[must_use]
    pub fn count_with_severity(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|unit_issue| unit_issue.issue.severity == severity)
            .count()
    }
}
