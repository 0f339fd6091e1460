//! # phenopackets-validator
//!
//! Validates phenopacket files on disk.
//!
//! The structural rules live in the `phenopackets` crate and know nothing
//! about files. This crate discovers JSON and YAML files, splits them into
//! documents, runs every document through those rules and collects the
//! results into one [`ValidationReport`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use phenopackets_validator::{validate_fs, FsSourceConfig, ValidationConfig};
//!
//! let mut fs_config = FsSourceConfig::default();
//! fs_config.paths = vec![PathBuf::from("data/phenopackets")];
//! fs_config.exclude = vec!["*.draft.json".to_owned()];
//!
//! let mut validation_config = ValidationConfig::default();
//! validation_config.warnings_as_errors = true;
//!
//! let report = validate_fs(&fs_config, &validation_config).unwrap();
//! println!("Documents: {}", report.documents.len());
//! println!("Errors: {}", report.errors_count());
//! println!("Scan errors: {}", report.scan_errors.len());
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
mod format;
pub mod output;
mod report;
mod strategy;

pub use config::{FsSourceConfig, ValidationConfig};
pub use error::{ScanError, ScanErrorKind};
pub use report::{DocumentReport, ValidationReport};

use std::fmt::Display;
use std::path::Path;

use format::LoadedDocument;
use phenopackets::validate_version;
use strategy::ContentFormat;
use strategy::fs::{ScanResult, content_format_for, find_files, read_file_bounded};

/// Validate phenopacket files on disk.
///
/// # Errors
///
/// Returns an error if `fs_config.paths` is empty or if any provided path does not exist.
/// Returns `Ok` with `scanned_files: 0` if the paths hold no JSON or YAML files.
/// Unreadable files, parse failures and non-object documents are reported in
/// `report.scan_errors`, never silently dropped.
pub fn validate_fs(
    fs_config: &FsSourceConfig,
    validation_config: &ValidationConfig,
) -> anyhow::Result<ValidationReport> {
    if fs_config.paths.is_empty() {
        anyhow::bail!("No paths provided for validation");
    }

    for path in &fs_config.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let (files, mut scan_errors) = find_files(fs_config);
    tracing::debug!(
        files = files.len(),
        discovery_errors = scan_errors.len(),
        "discovered phenopacket files"
    );

    let mut documents = Vec::new();
    let mut scanned_files: usize = 0;
    // Discovery failures are already in scan_errors; each counts as a failed file.
    let mut failed_files: usize = scan_errors.len();
    let mut total_bytes: u64 = 0;

    for file_path in &files {
        if scanned_files + failed_files >= fs_config.max_files {
            scan_errors.push(limit_error(file_path, "max_files", &fs_config.max_files));
            failed_files += 1;
            break;
        }

        let content = match read_file_bounded(file_path, fs_config.max_file_size) {
            ScanResult::Ok(c) => c,
            ScanResult::Err(e) => {
                tracing::warn!(file = %file_path.display(), "{}", e.message);
                scan_errors.push(e);
                failed_files += 1;
                continue;
            }
        };

        let file_bytes = content.len() as u64;
        if total_bytes.saturating_add(file_bytes) > fs_config.max_total_bytes {
            scan_errors.push(limit_error(
                file_path,
                "max_total_bytes",
                &fs_config.max_total_bytes,
            ));
            failed_files += 1;
            break;
        }
        total_bytes = total_bytes.saturating_add(file_bytes);

        let Some(kind) = content_format_for(file_path) else {
            continue;
        };
        let (loaded, mut file_errors) = load_documents(kind, &content, file_path);
        tracing::debug!(file = %file_path.display(), documents = loaded.len(), "loaded");

        for doc in loaded {
            match check_document(file_path, doc, validation_config) {
                Ok(report) => documents.push(report),
                Err(e) => file_errors.push(e),
            }
        }

        if file_errors.is_empty() {
            scanned_files += 1;
        } else {
            tracing::warn!(
                file = %file_path.display(),
                errors = file_errors.len(),
                "file could not be fully validated"
            );
            failed_files += 1;
            scan_errors.extend(file_errors);
        }
    }

    let documents_ok = documents.iter().all(|d| {
        d.result.is_valid()
            && (!validation_config.warnings_as_errors || d.result.warnings().is_empty())
    });
    let ok = documents_ok && scan_errors.is_empty();

    tracing::debug!(
        scanned_files,
        failed_files,
        documents = documents.len(),
        ok,
        "validation finished"
    );

    Ok(ValidationReport {
        scanned_files,
        failed_files,
        ok,
        documents,
        scan_errors,
    })
}

fn limit_error(file: &Path, limit: &str, value: &dyn Display) -> ScanError {
    ScanError::new(
        file,
        ScanErrorKind::LimitExceeded,
        format!("Scan aborted: {limit} limit ({value}) reached; remaining files not scanned"),
    )
}

fn load_documents(
    kind: ContentFormat,
    content: &str,
    file: &Path,
) -> (Vec<LoadedDocument>, Vec<ScanError>) {
    match kind {
        ContentFormat::Json => match format::json::load_json_documents(content, file) {
            Ok(docs) => (docs, Vec::new()),
            Err(e) => (Vec::new(), vec![e]),
        },
        ContentFormat::Yaml => format::yaml::load_yaml_documents(content, file),
    }
}

fn check_document(
    file: &Path,
    doc: LoadedDocument,
    config: &ValidationConfig,
) -> Result<DocumentReport, ScanError> {
    let location = match doc.index {
        Some(i) => format!("document {i}"),
        None => "document".to_owned(),
    };
    match validate_version(&doc.value, config.schema_version) {
        Ok(result) => Ok(DocumentReport {
            file: file.to_path_buf(),
            index: doc.index,
            result,
        }),
        // With the version already parsed, the only hard failure left is a non-object document.
        Err(e) => Err(ScanError::new(
            file,
            ScanErrorKind::NotAnObject,
            format!("{location}: {e}"),
        )),
    }
}
