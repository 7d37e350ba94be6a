//! Manifest source.
//!
//! Reads JSON or YAML manifests of already-resolved file-unit records and
//! turns them into [`FileUnit`]s. Every failure is returned as a
//! [`LoadError`]; nothing is dropped silently.
//!
//! Accepted layouts:
//! - a list of record objects
//! - an object with a `units` list of record objects
//! - an empty YAML document (no records)

use std::io::Read;
use std::path::Path;

use pxu::FileUnit;
use serde_json::Value;
use tracing::debug;

use crate::error::{LoadError, LoadErrorKind};

/// Key holding the record list when a manifest is an object.
pub const UNITS_KEY: &str = "units";

/// Manifest format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

/// Determine the manifest format from a file extension.
pub fn manifest_format_for(path: &Path) -> Option<ManifestFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Some(ManifestFormat::Json),
        Some("yaml" | "yml") => Some(ManifestFormat::Yaml),
        _ => None,
    }
}

/// Read a manifest using a bounded streaming read, enforcing `max_file_size`.
///
/// Uses `Read::take` so the size check and the read are the same operation.
/// Never calls `read_to_string` on an unbounded handle.
pub fn read_manifest_bounded(path: &Path, max_file_size: u64) -> Result<String, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| {
        LoadError::new(
            path.to_owned(),
            LoadErrorKind::IoError,
            format!("Failed to open manifest: {e}"),
        )
    })?;

    // Read at most max_file_size + 1 bytes to detect oversized manifests
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            LoadError::new(
                path.to_owned(),
                LoadErrorKind::IoError,
                format!("Failed to read manifest: {e}"),
            )
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(LoadError::new(
            path.to_owned(),
            LoadErrorKind::FileTooLarge,
            format!("Manifest exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        LoadError::new(
            path.to_owned(),
            LoadErrorKind::InvalidEncoding,
            "Manifest is not valid UTF-8",
        )
    })
}

/// Parse manifest content into its list of raw records.
///
/// # Errors
///
/// Returns a `LoadError` if the content does not parse, or parses to
/// something other than one of the accepted layouts.
pub fn parse_manifest(
    content: &str,
    path: &Path,
    format: ManifestFormat,
) -> Result<Vec<Value>, LoadError> {
    let document: Value = match format {
        ManifestFormat::Json => serde_json::from_str(content).map_err(|e| {
            LoadError::new(
                path.to_owned(),
                LoadErrorKind::JsonParseError,
                format!("JSON parse error: {e}"),
            )
        })?,
        ManifestFormat::Yaml => {
            if content.trim().is_empty() {
                return Ok(Vec::new());
            }
            serde_saphyr::from_str(content).map_err(|e| {
                LoadError::new(
                    path.to_owned(),
                    LoadErrorKind::YamlParseError,
                    format!("YAML parse error: {e}"),
                )
            })?
        }
    };

    match document {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove(UNITS_KEY) {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(LoadError::new(
                path.to_owned(),
                LoadErrorKind::InvalidLayout,
                format!(
                    "'{UNITS_KEY}' must be a list of records, got {}",
                    json_type_name(&other)
                ),
            )),
            None => Err(LoadError::new(
                path.to_owned(),
                LoadErrorKind::InvalidLayout,
                format!("manifest object has no '{UNITS_KEY}' list"),
            )),
        },
        Value::Null => Ok(Vec::new()),
        other => Err(LoadError::new(
            path.to_owned(),
            LoadErrorKind::InvalidLayout,
            format!(
                "manifest must be a list of records, got {}",
                json_type_name(&other)
            ),
        )),
    }
}

/// Turn raw records into file units.
///
/// Returns `(units, load_errors)`: one `LoadError` per record that is not a
/// well-formed file-unit record, tagged with the record's index.
pub fn load_units(records: &[Value], path: &Path) -> (Vec<FileUnit>, Vec<LoadError>) {
    let mut units = Vec::with_capacity(records.len());
    let mut load_errors = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match FileUnit::from_json(record) {
            Ok(unit) => units.push(unit),
            Err(e) => {
                debug!(manifest = %path.display(), index, error = %e, "rejected record");
                let mut err =
                    LoadError::new(path.to_owned(), LoadErrorKind::InvalidRecord, e.to_string());
                err.record = Some(index);
                load_errors.push(err);
            }
        }
    }

    (units, load_errors)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
