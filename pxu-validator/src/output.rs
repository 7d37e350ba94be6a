//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport`, plus the
//! file role listing. Color/terminal formatting is left to the CLI layer.

use std::io::Write;

use pxu::{FileRole, Severity, Symbol};

use crate::report::ValidationReport;

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  PROVIDER FILE UNIT VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Units checked:  {}", report.checked_units)?;
    writeln!(writer, "  Bad records:    {}", report.failed_records)?;
    writeln!(writer, "  Load errors:    {}", report.load_errors.len())?;
    writeln!(
        writer,
        "  Issues found:   {} ({} error, {} warning, {} advice)",
        report.issues_count(),
        report.count_with_severity(Severity::Error),
        report.count_with_severity(Severity::Warning),
        report.count_with_severity(Severity::Advice),
    )?;
    writeln!(writer)?;

    if !report.load_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  LOAD ERRORS (records that could not be validated)")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for load_err in &report.load_errors {
            writeln!(writer, "{}", load_err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.issues.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  ISSUES")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for unit_issue in &report.issues {
            writeln!(writer, "{}", unit_issue.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "OK: {} unit(s) passed validation",
            report.checked_units
        )?;
    } else {
        if !report.load_errors.is_empty() {
            writeln!(
                writer,
                "FAILED: {} load error(s), validation is incomplete; CI must treat this as a failure",
                report.load_errors.len()
            )?;
        }
        let lesser = report
            .issues
            .iter()
            .filter(|unit_issue| !unit_issue.issue.severity.at_least(Severity::Error))
            .count();
        let errors = report.issues_count() - lesser;
        if report.issues_count() > 0 {
            writeln!(
                writer,
                "FAILED: {errors} error(s) and {lesser} lesser issue(s) found"
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}

/// Write every file role identifier, one per line, sorted by identifier.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_roles(writer: &mut dyn Write) -> anyhow::Result<()> {
    for role in FileRole::sorted_identifiers() {
        writeln!(writer, "{role}")?;
    }
    Ok(())
}
