//! Integration tests for `pxu_validator::validate_manifests`.

use std::fs;
use std::path::PathBuf;

use pxu::{Problem, Severity};
use pxu_validator::{LoadErrorKind, ManifestSourceConfig, ValidationConfig, validate_manifests};
use tempfile::TempDir;

fn default_validation_config() -> ValidationConfig {
    ValidationConfig::default()
}

fn default_source_config(paths: Vec<PathBuf>) -> ManifestSourceConfig {
    let mut cfg = ManifestSourceConfig::default();
    cfg.paths = paths;
    cfg
}

fn write_manifest(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_validate_manifests_empty_paths_errors() {
    let source = default_source_config(vec![]);
    let result = validate_manifests(&source, &default_validation_config());
    assert!(result.is_err());
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("No manifests provided"), "got: {msg}");
}

#[test]
fn test_validate_manifests_nonexistent_path_errors() {
    let tmp = TempDir::new().unwrap();
    let nonexistent = tmp.path().join("does_not_exist.json");
    let source = default_source_config(vec![nonexistent]);
    let result = validate_manifests(&source, &default_validation_config());
    assert!(result.is_err());
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("does not exist"), "got: {msg}");
}

#[test]
fn test_validate_clean_json_manifest() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(
        &tmp,
        "units.json",
        r#"[
            {"path": "/p/units/suite.pxu", "role": "unit-source", "base": "/p"},
            {"path": "/p/bin/run", "role": "script", "base": "/p"},
            {"path": "/p/README.md"}
        ]"#,
    );

    let report =
        validate_manifests(&default_source_config(vec![manifest]), &default_validation_config())
            .unwrap();

    assert_eq!(report.checked_units, 3);
    assert!(report.ok, "expected ok, got issues: {:?}", report.issues);
    assert_eq!(report.issues_count(), 0);
    assert!(report.load_errors.is_empty());
}

#[test]
fn test_legacy_extension_is_advice_only() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(
        &tmp,
        "units.yaml",
        "units:\n  - path: /p/units/suite.txt\n    role: unit-source\n",
    );

    let report = validate_manifests(
        &default_source_config(vec![manifest.clone()]),
        &default_validation_config(),
    )
    .unwrap();

    assert_eq!(report.checked_units, 1);
    assert!(report.ok, "advice must not fail the run by default");
    assert_eq!(report.issues_count(), 1);
    let unit_issue = &report.issues[0];
    assert_eq!(unit_issue.file.as_deref(), Some(manifest.as_path()));
    assert_eq!(unit_issue.unit, "/p/units/suite.txt");
    assert_eq!(unit_issue.issue.problem, Problem::Deprecated);
    assert_eq!(unit_issue.issue.severity, Severity::Advice);
}

#[test]
fn test_fail_on_advice_makes_legacy_extension_fail() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(
        &tmp,
        "units.yml",
        "- path: /p/units/suite.txt\n  role: unit-source\n",
    );

    let mut config = default_validation_config();
    config.fail_on = Severity::Advice;
    let report = validate_manifests(&default_source_config(vec![manifest]), &config).unwrap();
    assert!(!report.ok);
}

#[test]
fn test_unknown_role_fails() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(
        &tmp,
        "units.json",
        r#"{"units": [{"path": "/p/units/suite.pxu", "role": "unit_source"}]}"#,
    );

    let report =
        validate_manifests(&default_source_config(vec![manifest]), &default_validation_config())
            .unwrap();

    assert!(!report.ok);
    assert_eq!(report.count_with_severity(Severity::Error), 1);
    let message = report.issues[0].issue.message.as_deref().unwrap();
    assert!(message.contains("unit-source"), "got: {message}");
    // The extension rule only fires for a recognized unit-source role.
    assert!(
        report
            .issues
            .iter()
            .all(|i| i.issue.problem != Problem::Deprecated)
    );
}

#[test]
fn test_min_severity_hides_advice() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(
        &tmp,
        "units.json",
        r#"[{"path": "/p/units/suite.txt", "role": "unit-source"}]"#,
    );

    let mut config = default_validation_config();
    config.min_severity = Severity::Warning;
    let report = validate_manifests(&default_source_config(vec![manifest]), &config).unwrap();
    assert_eq!(report.checked_units, 1);
    assert_eq!(report.issues_count(), 0);
    assert!(report.ok);
}

#[test]
fn test_invalid_json_is_load_error() {
    let tmp = TempDir::new().unwrap();
    let broken = write_manifest(&tmp, "broken.json", "[{\"path\": ");
    let good = write_manifest(&tmp, "good.json", r#"[{"path": "/p/x", "role": "data"}]"#);

    let report = validate_manifests(
        &default_source_config(vec![broken, good]),
        &default_validation_config(),
    )
    .unwrap();

    assert_eq!(report.checked_units, 1, "good manifest still checked");
    assert_eq!(report.load_errors.len(), 1);
    assert_eq!(report.load_errors[0].kind, LoadErrorKind::JsonParseError);
    assert_eq!(report.failed_records, 0, "a broken manifest is not a bad record");
    assert!(!report.ok, "load errors always fail the run");
}

#[test]
fn test_bad_records_are_load_errors() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(
        &tmp,
        "units.json",
        r#"[
            {"path": "/p/a", "role": "data"},
            {"path": "/p/b", "owner": "someone"},
            {"path": ["/p/c"]}
        ]"#,
    );

    let report =
        validate_manifests(&default_source_config(vec![manifest]), &default_validation_config())
            .unwrap();

    assert_eq!(report.checked_units, 1);
    assert_eq!(report.records_attempted(), 3);
    assert_eq!(
        report
            .load_errors
            .iter()
            .map(|e| e.record)
            .collect::<Vec<_>>(),
        vec![Some(1), Some(2)]
    );
    assert!(!report.ok);
}

#[test]
fn test_unsupported_manifest_extension() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "units.toml", "[[units]]\npath = \"/p/x\"\n");

    let report =
        validate_manifests(&default_source_config(vec![manifest]), &default_validation_config())
            .unwrap();

    assert_eq!(report.checked_units, 0);
    assert_eq!(report.load_errors[0].kind, LoadErrorKind::UnsupportedFormat);
    assert!(!report.ok);
}

#[test]
fn test_manifest_too_large() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "units.json", r#"[{"path": "/p/x"}]"#);

    let mut source = default_source_config(vec![manifest]);
    source.max_file_size = 4;
    let report = validate_manifests(&source, &default_validation_config()).unwrap();

    assert_eq!(report.load_errors[0].kind, LoadErrorKind::FileTooLarge);
    assert!(!report.ok);
}

#[test]
fn test_max_units_truncates_run() {
    let tmp = TempDir::new().unwrap();
    let first = write_manifest(
        &tmp,
        "a.json",
        r#"[{"path": "/p/a"}, {"path": "/p/b"}]"#,
    );
    let second = write_manifest(&tmp, "b.json", r#"[{"path": "/p/c"}]"#);

    let mut source = default_source_config(vec![first, second]);
    source.max_units = 1;
    let report = validate_manifests(&source, &default_validation_config()).unwrap();

    assert_eq!(report.checked_units, 1);
    assert_eq!(report.failed_records, 0);
    assert_eq!(report.records_attempted(), 1);
    assert_eq!(report.load_errors.len(), 1);
    assert_eq!(report.load_errors[0].kind, LoadErrorKind::LimitExceeded);
    assert!(report.load_errors[0].file.ends_with("a.json"));
    assert!(!report.ok);
}

#[test]
fn test_empty_yaml_manifest_is_ok() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "units.yaml", "");

    let report =
        validate_manifests(&default_source_config(vec![manifest]), &default_validation_config())
            .unwrap();

    assert_eq!(report.checked_units, 0);
    assert!(report.ok);
}

#[test]
fn test_failed_records_counts_only_rejected_records() {
    let tmp = TempDir::new().unwrap();
    let broken = write_manifest(&tmp, "broken.yaml", "units: [\n");
    let mixed = write_manifest(
        &tmp,
        "mixed.json",
        r#"[
            {"path": "/p/a", "owner": "someone"},
            {"path": "/p/b"},
            {"path": "/p/c"},
            {"path": "/p/d"}
        ]"#,
    );

    let mut source = default_source_config(vec![broken, mixed]);
    source.max_units = 1;
    let report = validate_manifests(&source, &default_validation_config()).unwrap();

    let kinds: Vec<&LoadErrorKind> = report.load_errors.iter().map(|e| &e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &LoadErrorKind::YamlParseError,
            &LoadErrorKind::InvalidRecord,
            &LoadErrorKind::LimitExceeded,
        ]
    );
    assert_eq!(report.checked_units, 1);
    assert_eq!(report.failed_records, 1);
    assert_eq!(report.records_attempted(), 2);
    assert!(!report.ok);
}
