//! Validation report types.

use std::path::PathBuf;

use phenopackets::ValidationResult;
use serde::Serialize;

use crate::error::ScanError;

/// Findings for one phenopacket document.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct DocumentReport {
    /// File the document came from.
    pub file: PathBuf,
    /// Position of the document in a multi-document file (JSON array or YAML
    /// stream); `None` for single-document files.
    pub index: Option<usize>,
    /// Structural validation outcome.
    pub result: ValidationResult,
}

impl DocumentReport {
    /// `file` or `file#index`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.index {
            Some(i) => format!("{}#{i}", self.file.display()),
            None => self.file.display().to_string(),
        }
    }
}

/// Result of a validation run.
///
/// CI pipelines must check both the document findings and `scan_errors`.
/// A non-empty `scan_errors` means some input was never validated; treat it
/// as a failure regardless of the documents' results.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Number of files successfully scanned (read + parsed).
    pub scanned_files: usize,
    /// Number of files that could not be scanned, fully or in part.
    pub failed_files: usize,
    /// Whether every document is valid (and warning-free when warnings count
    /// as errors) AND no scan errors occurred.
    pub ok: bool,
    /// One entry per validated document, in file order.
    pub documents: Vec<DocumentReport>,
    /// Files or documents that could not be validated.
    pub scan_errors: Vec<ScanError>,
}

impl ValidationReport {
    /// Total number of files attempted (scanned + failed).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.scanned_files + self.failed_files
    }

    /// Total number of validation errors across all documents.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.documents.iter().map(|d| d.result.errors().len()).sum()
    }

    /// Total number of warnings across all documents.
    #[must_use]
    pub fn warnings_count(&self) -> usize {
        self.documents.iter().map(|d| d.result.warnings().len()).sum()
    }

    /// Documents with at least one error.
    pub fn invalid_documents(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| !d.result.is_valid())
    }
}
