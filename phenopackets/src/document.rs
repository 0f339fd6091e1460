//! Generic document access.
//!
//! A phenopacket document is whatever a JSON (or YAML) parser produced: a
//! tree of mappings, sequences and scalars. The validator only ever reads it.

use serde_json::Value;

/// The untyped input tree. Always borrowed, never mutated by validation.
pub type Document = Value;

/// Whether a value counts as "present" for required/recommended checks.
///
/// Missing keys are handled by the caller; this decides for values that do
/// exist. `null`, `false`, `0` and `""` are treated as absent, matching the
/// truthiness rules phenopacket producers have historically relied on.
/// Empty arrays and empty objects are present.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Short name of the value's kind, for diagnostics.
#[must_use]
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolve a dotted field path (`sampleType.id`) below `node`.
///
/// Each step must land on a mapping; descending into anything else (a
/// scalar, a sequence, `null`) yields `None`, the same as a missing key.
#[must_use]
pub fn lookup<'a>(node: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|seg| !seg.is_empty())
        .try_fold(node, |cur, seg| cur.as_object()?.get(seg))
}
