//! JSON text helpers.

use std::path::Path;

use serde_json::Value;

use crate::error::{GoldenFileError, ValidateError};

/// Parse JSON text into a document.
///
/// # Errors
///
/// Returns [`ValidateError::InvalidJson`] if the text is not valid JSON.
pub fn parse_document(text: &str) -> Result<Value, ValidateError> {
    Ok(serde_json::from_str(text)?)
}

/// Render a document as JSON text, compact or pretty-printed (2-space indent).
///
/// # Errors
///
/// Returns an error only if serialization fails, which cannot happen for
/// values produced by a JSON or YAML parser.
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Compare a document with the contents of a golden JSON file.
///
/// The comparison is structural: whitespace and key order in the file do not
/// matter.
///
/// # Errors
///
/// Returns [`GoldenFileError`] if the file cannot be read or parsed.
pub fn matches_golden(value: &Value, golden: &Path) -> Result<bool, GoldenFileError> {
    let text = std::fs::read_to_string(golden).map_err(|source| GoldenFileError::Io {
        path: golden.to_owned(),
        source,
    })?;
    let expected: Value = serde_json::from_str(&text).map_err(|source| GoldenFileError::Parse {
        path: golden.to_owned(),
        source,
    })?;
    Ok(&expected == value)
}
