//! Format-specific document loaders.
//!
//! - `json`: one object per file, or a top-level array of documents
//! - `yaml`: every document of a (possibly multi-document) stream

pub mod json;
pub mod yaml;

use serde_json::Value;

/// One parsed document, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    /// Position within a multi-document file; `None` for single-document files.
    pub index: Option<usize>,
    pub value: Value,
}
