//! Rule-table walk.
//!
//! Interprets the tables in [`rules`](crate::rules) against a document and
//! accumulates findings. The walk never stops early: every applicable rule
//! runs, so one call reports everything that is wrong with a document.

use phenopackets_id::{CURIE_EXAMPLE, has_separator};
use serde_json::Value;
use tracing::debug;

use crate::document::{is_truthy, kind_name, lookup};
use crate::error::ValidateError;
use crate::json::parse_document;
use crate::result::{TermFindings, ValidationResult};
use crate::rules::{FieldRule, Presence, Requirement, Severity, Shape, rules_for};
use crate::schema::SchemaVersion;

/// Validate a document against the named schema version.
///
/// # Errors
///
/// Returns [`ValidateError::NotAnObject`] if `document` is not a mapping and
/// [`ValidateError::UnsupportedSchemaVersion`] if `schema_version` is not
/// `"v1"` or `"v2"`. The document check runs first. Field-level problems are
/// never errors; they are findings in the returned result.
pub fn validate(document: &Value, schema_version: &str) -> Result<ValidationResult, ValidateError> {
    ensure_object(document)?;
    let version: SchemaVersion = schema_version.parse()?;
    Ok(walk_document(document, version))
}

/// Validate a document against an already-parsed schema version.
///
/// # Errors
///
/// Returns [`ValidateError::NotAnObject`] if `document` is not a mapping.
pub fn validate_version(
    document: &Value,
    version: SchemaVersion,
) -> Result<ValidationResult, ValidateError> {
    ensure_object(document)?;
    Ok(walk_document(document, version))
}

/// Parse JSON text and validate it.
///
/// # Errors
///
/// Returns [`ValidateError::InvalidJson`] if `text` is not valid JSON, and
/// otherwise the same errors as [`validate`].
pub fn validate_json_str(text: &str, schema_version: &str) -> Result<ValidationResult, ValidateError> {
    let document = parse_document(text)?;
    validate(&document, schema_version)
}

/// Check an ontology-term fragment (`{id, label}`) in isolation.
///
/// `field_path` prefixes every message, e.g. `phenotypicFeaturesList[0].type`.
#[must_use]
pub fn validate_ontology_term(term: &Value, field_path: &str) -> TermFindings {
    let mut findings = TermFindings::default();

    let Value::Object(map) = term else {
        findings
            .errors
            .push(format!("{field_path} must be an object"));
        return findings;
    };

    match map.get("id").filter(|v| is_truthy(v)) {
        None => findings.errors.push(format!("{field_path}.id is required")),
        Some(Value::String(id)) => {
            if !has_separator(id) {
                findings.warnings.push(format!(
                    "{field_path}.id should be a CURIE (e.g., '{CURIE_EXAMPLE}')"
                ));
            }
        }
        Some(_) => findings
            .errors
            .push(format!("{field_path}.id must be a string")),
    }

    match map.get("label").filter(|v| is_truthy(v)) {
        None => findings
            .warnings
            .push(format!("{field_path}.label is recommended")),
        Some(Value::String(_)) => {}
        Some(_) => findings
            .errors
            .push(format!("{field_path}.label must be a string")),
    }

    findings
}

fn ensure_object(document: &Value) -> Result<(), ValidateError> {
    if document.is_object() {
        Ok(())
    } else {
        Err(ValidateError::NotAnObject {
            found: kind_name(document),
        })
    }
}

fn walk_document(document: &Value, version: SchemaVersion) -> ValidationResult {
    let mut result = ValidationResult::new();
    walk_fields(rules_for(version), document, Scope::root(), &mut result);
    debug!(
        schema_version = %version,
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "phenopacket validated"
    );
    result
}

/// Where the rules being applied live in the document.
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    /// Dotted path of the containing mapping; empty at the top level.
    prefix: &'a str,
    /// Set while walking a sequence element: `(label, index)`.
    element: Option<(&'static str, usize)>,
}

impl<'a> Scope<'a> {
    const fn root() -> Self {
        Self {
            prefix: "",
            element: None,
        }
    }

    const fn nested(prefix: &'a str) -> Self {
        Self {
            prefix,
            element: None,
        }
    }

    const fn element(prefix: &'a str, label: &'static str, index: usize) -> Self {
        Self {
            prefix,
            element: Some((label, index)),
        }
    }

    fn path_of(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{name}", self.prefix)
        }
    }
}

fn walk_fields(rules: &[FieldRule], container: &Value, scope: Scope<'_>, result: &mut ValidationResult) {
    for rule in rules {
        check_field(rule, container, scope, result);
    }
}

fn check_field(rule: &FieldRule, container: &Value, scope: Scope<'_>, result: &mut ValidationResult) {
    let value = lookup(container, rule.name).filter(|v| match rule.presence {
        Presence::Truthy => is_truthy(v),
        Presence::Defined => true,
    });

    let Some(value) = value else {
        report_missing(rule, scope, result);
        return;
    };

    let path = scope.path_of(rule.name);

    let shape_ok = match rule.shape {
        Shape::Any => true,
        Shape::String => value.is_string(),
        Shape::Object => value.is_object(),
        Shape::Array => value.is_array(),
        Shape::OntologyTerm => {
            result.absorb(validate_ontology_term(value, &path));
            true
        }
    };
    if !shape_ok {
        report_shape(rule, &path, result);
        return;
    }

    if !rule.fields.is_empty() {
        walk_fields(rule.fields, value, Scope::nested(&path), result);
    }

    if let (Some(elements), Value::Array(items)) = (rule.elements, value) {
        for (index, item) in items.iter().enumerate() {
            let prefix = format!("{path}[{index}]");
            walk_fields(
                elements.fields,
                item,
                Scope::element(&prefix, elements.label, index),
                result,
            );
        }
    }
}

fn report_missing(rule: &FieldRule, scope: Scope<'_>, result: &mut ValidationResult) {
    let (severity, kind) = match rule.requirement {
        Requirement::Required => (Severity::Error, "required"),
        Requirement::Recommended => (Severity::Warning, "recommended"),
        Requirement::Optional => return,
    };

    let message = match (rule.missing_message, scope.element) {
        (Some(message), _) => message.to_owned(),
        (None, Some((label, index))) => {
            format!("{label} at index {index} is missing {kind} field: {}", rule.name)
        }
        (None, None) => match severity {
            Severity::Error => format!("Missing required field: {}", scope.path_of(rule.name)),
            Severity::Warning => format!("Missing recommended field: {}", scope.path_of(rule.name)),
        },
    };

    push(result, severity, message);
}

fn report_shape(rule: &FieldRule, path: &str, result: &mut ValidationResult) {
    let message = match (rule.shape_message, rule.shape) {
        (Some(message), _) => message.to_owned(),
        (None, Shape::String) => format!("Field {path} must be a string"),
        (None, Shape::Object) => format!("Field {path} must be an object"),
        (None, Shape::Array) => format!("{path} must be an array"),
        (None, Shape::Any | Shape::OntologyTerm) => return,
    };
    push(result, rule.shape_severity, message);
}

fn push(result: &mut ValidationResult, severity: Severity, message: String) {
    match severity {
        Severity::Error => result.push_error(message),
        Severity::Warning => result.push_warning(message),
    }
}
