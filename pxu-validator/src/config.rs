//! Configuration types for file-unit validation.
//!
//! Split into core validation config (what counts as a failure) and
//! manifest source config (where already-resolved unit records come from).

use std::path::PathBuf;

use pxu::Severity;

/// Core validation config: applies regardless of where units come from.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Issues below this severity are left out of the report (default: advice,
    /// i.e. everything is reported).
    pub min_severity: Severity,
    /// Issues at or above this severity make the report fail (default: error).
    /// Advice and warnings are surfaced to the author but do not block.
    pub fail_on: Severity,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_severity: Severity::Advice,
            fail_on: Severity::Error,
        }
    }
}

/// Manifest source options.
///
/// A manifest is a JSON or YAML file listing file-unit records that the
/// provider loader already resolved. `paths` names manifest files, not
/// provider directories.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ManifestSourceConfig {
    /// Manifest files to load. Required, must be non-empty.
    pub paths: Vec<PathBuf>,
    /// Maximum manifest size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Maximum number of unit records across all manifests (default: `100_000`).
    pub max_units: usize,
}

impl Default for ManifestSourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            max_file_size: 10_485_760,
            max_units: 100_000,
        }
    }
}
