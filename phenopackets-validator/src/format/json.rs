//! JSON document loader.
//!
//! A file holds either one phenopacket (a top-level object) or a batch of
//! them (a top-level array, each element one document).

use std::path::Path;

use serde_json::Value;

use crate::error::{ScanError, ScanErrorKind};
use crate::format::LoadedDocument;

/// Parse JSON content into the documents it contains.
///
/// # Errors
///
/// Returns a `ScanError` if the content is not valid JSON.
/// Invalid JSON must be reported as a scan failure, never silently ignored.
pub fn load_json_documents(content: &str, path: &Path) -> Result<Vec<LoadedDocument>, ScanError> {
    let value: Value = serde_json::from_str(content).map_err(|e| {
        ScanError::new(path, ScanErrorKind::JsonParseError, format!("JSON parse error: {e}"))
    })?;

    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, value)| LoadedDocument {
                index: Some(i),
                value,
            })
            .collect(),
        other => vec![LoadedDocument {
            index: None,
            value: other,
        }],
    })
}
