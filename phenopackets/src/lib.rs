//! # phenopackets
//!
//! Structural validation for GA4GH Phenopacket JSON documents, plus the small
//! JSON helpers that usually travel with it (empty templates, protobuf
//! timestamps, golden-file comparison).
//!
//! Validation runs on a generic [`serde_json::Value`] tree. No typed
//! phenopacket messages are constructed, so the check can run before (or
//! instead of) any message-building step.
//!
//! ```rust
//! use phenopackets::validate;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "id": "p1",
//!     "subject": {"id": "s1"},
//!     "metaData": {"created": "2024-01-01T00:00:00Z", "createdBy": "curator"}
//! });
//!
//! let result = validate(&doc, "v2").unwrap();
//! assert!(result.is_valid());
//! ```

pub mod document;
pub mod error;
pub mod json;
pub mod result;
pub mod rules;
pub mod schema;
pub mod template;
pub mod timestamp;
pub mod validator;


// Re-export commonly used types
pub use document::Document;
pub use error::{GoldenFileError, ValidateError};
pub use json::{matches_golden, parse_document, to_json_string};
pub use result::{TermFindings, ValidationResult};
pub use rules::{ElementRules, FieldRule, Presence, Requirement, Severity, Shape, rules_for};
pub use schema::SchemaVersion;
pub use template::{empty_phenopacket, stamp_meta_data};
pub use timestamp::{Timestamp, TimestampError};
pub use validator::{validate, validate_json_str, validate_ontology_term, validate_version};
