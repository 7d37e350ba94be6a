//! Error types for file-unit validation runs.

use std::path::PathBuf;

use pxu::Issue;
use serde::Serialize;

/// The kind of load-level failure that kept records from being validated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadErrorKind {
    /// An I/O error occurred while reading the manifest.
    IoError,
    /// The manifest exceeded the configured maximum size.
    FileTooLarge,
    /// The manifest is not valid UTF-8.
    InvalidEncoding,
    /// The manifest extension is neither JSON nor YAML.
    UnsupportedFormat,
    /// The manifest could not be parsed as JSON.
    JsonParseError,
    /// The manifest could not be parsed as YAML.
    YamlParseError,
    /// The manifest parsed but is not a list of records.
    InvalidLayout,
    /// A record could not be turned into a file unit.
    InvalidRecord,
    /// The `max_units` limit was reached, truncating the run.
    LimitExceeded,
}

/// A load-level error: a manifest or record that could not be validated.
///
/// Distinct from [`UnitIssue`], which is a unit that was validated and
/// found wanting. A `LoadError` means validation did not cover everything;
/// callers must treat it as a failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct LoadError {
    /// The manifest that failed.
    pub file: PathBuf,
    /// Index of the failing record within the manifest, if one record failed.
    pub record: Option<usize>,
    /// The kind of failure.
    pub kind: LoadErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl LoadError {
    pub(crate) fn new(file: PathBuf, kind: LoadErrorKind, message: impl Into<String>) -> Self {
        Self {
            file,
            record: None,
            kind,
            message: message.into(),
        }
    }

    /// Format the error for human-readable output.
    ///
    /// `{file}: [load error] {message}`, or `{file}#{record}: ...` when a
    /// single record failed.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match self.record {
            Some(index) => format!(
                "{}#{index}: [load error] {}",
                self.file.display(),
                self.message
            ),
            None => format!("{}: [load error] {}", self.file.display(), self.message),
        }
    }
}

/// An issue found on one unit, with where that unit came from.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct UnitIssue {
    /// Manifest the unit was loaded from; `None` for units passed in directly.
    pub file: Option<PathBuf>,
    /// The unit's display form (for file units, the path).
    pub unit: String,
    /// The issue itself.
    pub issue: Issue,
}

impl UnitIssue {
    /// Format the issue for human-readable output.
    ///
    /// `{file}: {unit}: {issue}`, dropping the manifest part for units that
    /// were not loaded from one.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        let issue = self.issue.format_human_readable();
        match &self.file {
            Some(file) => format!("{}: {}: {issue}", file.display(), self.unit),
            None => format!("{}: {issue}", self.unit),
        }
    }
}
