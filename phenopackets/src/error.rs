//! Error types for phenopacket validation.
//!
//! These are *operation* failures: the caller handed over something that
//! cannot be validated at all. Field-level problems inside a well-formed
//! document are never errors here; they are findings in a
//! [`ValidationResult`](crate::ValidationResult).

use std::path::PathBuf;

use thiserror::Error;

/// Hard failures of a validation call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidateError {
    /// The top-level document is not a mapping.
    #[error("Invalid JSON: must be an object, got {found}")]
    NotAnObject {
        /// Kind of value that was supplied instead (`array`, `string`, ...).
        found: &'static str,
    },

    /// The schema version tag is not one of the supported versions.
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// JSON text could not be parsed.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Failures while comparing a document with a golden file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GoldenFileError {
    /// The golden file could not be read.
    #[error("Error comparing with golden file {}: {source}", .path.display())]
    Io {
        /// Golden file path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The golden file is not valid JSON.
    #[error("Error comparing with golden file {}: {source}", .path.display())]
    Parse {
        /// Golden file path.
        path: PathBuf,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_version_message() {
        let err = ValidateError::UnsupportedSchemaVersion("v3".to_owned());
        assert_eq!(err.to_string(), "Unsupported schema version: v3");
    }

    #[test]
    fn test_not_an_object_message() {
        let err = ValidateError::NotAnObject { found: "array" };
        assert!(err.to_string().contains("must be an object"));
        assert!(err.to_string().contains("array"));
    }
}
