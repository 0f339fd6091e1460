//! Shared output formatting for validation reports.
//!
//! JSON and plain-text writers for `ValidationReport`. Colors are left to
//! the CLI.

use std::io::Write;

use crate::report::{DocumentReport, ValidationReport};

/// Write a `ValidationReport` as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

fn write_document(doc: &DocumentReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for error in doc.result.errors() {
        writeln!(writer, "{}: error: {error}", doc.label())?;
    }
    for warning in doc.result.warnings() {
        writeln!(writer, "{}: warning: {warning}", doc.label())?;
    }
    Ok(())
}

/// Write a `ValidationReport` as human-readable plain text.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  PHENOPACKET VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files scanned:  {}", report.scanned_files)?;
    writeln!(writer, "  Files failed:   {}", report.failed_files)?;
    writeln!(writer, "  Documents:      {}", report.documents.len())?;
    writeln!(writer, "  Errors found:   {}", report.errors_count())?;
    writeln!(writer, "  Warnings found: {}", report.warnings_count())?;
    writeln!(writer)?;

    if !report.scan_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  SCAN ERRORS (files that could not be validated)")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for scan_err in &report.scan_errors {
            writeln!(writer, "{}", scan_err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    let flagged: Vec<&DocumentReport> = report
        .documents
        .iter()
        .filter(|d| !d.result.errors().is_empty() || !d.result.warnings().is_empty())
        .collect();
    if !flagged.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  FINDINGS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for doc in flagged {
            write_document(doc, writer)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} document(s) in {} file(s) passed validation",
            report.documents.len(),
            report.scanned_files
        )?;
    } else {
        if !report.scan_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} file(s) could not be fully scanned",
                report.failed_files
            )?;
        }
        let invalid = report.invalid_documents().count();
        if invalid > 0 {
            writeln!(
                writer,
                "\u{2717} {invalid} invalid phenopacket(s), {} error(s)",
                report.errors_count()
            )?;
        } else if report.scan_errors.is_empty() && report.warnings_count() > 0 {
            writeln!(
                writer,
                "\u{2717} {} warning(s) treated as errors",
                report.warnings_count()
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ScanError, ScanErrorKind};
    use phenopackets::ValidationResult;
    use std::path::PathBuf;

    fn report(documents: Vec<DocumentReport>, scan_errors: Vec<ScanError>, ok: bool) -> ValidationReport {
        ValidationReport {
            scanned_files: 1,
            failed_files: usize::from(!scan_errors.is_empty()),
            ok,
            documents,
            scan_errors,
        }
    }

    fn document(errors: &[&str], warnings: &[&str]) -> DocumentReport {
        let mut result = ValidationResult::new();
        for e in errors {
            result.push_error(*e);
        }
        for w in warnings {
            result.push_warning(*w);
        }
        DocumentReport {
            file: PathBuf::from("p.json"),
            index: None,
            result,
        }
    }

    fn render_human(report: &ValidationReport) -> String {
        let mut buf = Vec::new();
        write_human(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_human_ok() {
        let out = render_human(&report(vec![document(&[], &[])], vec![], true));
        assert!(out.contains("PHENOPACKET VALIDATOR"));
        assert!(out.contains("All 1 document(s) in 1 file(s) passed validation"));
        assert!(!out.contains("FINDINGS"));
    }

    #[test]
    fn test_human_lists_findings() {
        let out = render_human(&report(
            vec![document(&["Missing required field: id"], &["No subject information provided"])],
            vec![],
            false,
        ));
        assert!(out.contains("p.json: error: Missing required field: id"));
        assert!(out.contains("p.json: warning: No subject information provided"));
        assert!(out.contains("1 invalid phenopacket(s), 1 error(s)"));
    }

    #[test]
    fn test_human_scan_errors() {
        let err = ScanError::new("bad.json", ScanErrorKind::JsonParseError, "JSON parse error: EOF");
        let out = render_human(&report(vec![], vec![err], false));
        assert!(out.contains("SCAN ERRORS"));
        assert!(out.contains("bad.json: [scan error] JSON parse error: EOF"));
        assert!(out.contains("1 file(s) could not be fully scanned"));
    }

    #[test]
    fn test_human_warnings_as_errors() {
        let out = render_human(&report(vec![document(&[], &["Subject sex not specified"])], vec![], false));
        assert!(out.contains("1 warning(s) treated as errors"));
    }

    #[test]
    fn test_json_shape() {
        let mut buf = Vec::new();
        write_json(&report(vec![document(&["x"], &[])], vec![], false), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["ok"], serde_json::json!(false));
        assert_eq!(value["documents"][0]["result"]["isValid"], serde_json::json!(false));
        assert_eq!(value["documents"][0]["result"]["errors"][0], serde_json::json!("x"));
    }
}
