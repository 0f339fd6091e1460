//! Validation result types.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Findings of one ontology-term check.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TermFindings {
    /// Blocking problems, in check order.
    pub errors: Vec<String>,
    /// Advisory problems, in check order.
    pub warnings: Vec<String>,
}

impl TermFindings {
    /// `true` when the term produced no errors (warnings allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of validating one document.
///
/// Findings are append-only: nothing removes an error once recorded, so
/// [`is_valid`](Self::is_valid) can be read at any point, though it is only
/// meaningful once the walk has finished.
///
/// Serializes as `{"isValid": bool, "errors": [...], "warnings": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    /// An empty, valid result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` iff no errors were recorded. Warnings never affect validity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Blocking findings, in rule-walk order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Advisory findings, in rule-walk order.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Record a blocking finding.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record an advisory finding.
    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Fold the findings of a sub-check into this result.
    pub fn absorb(&mut self, findings: TermFindings) {
        self.errors.extend(findings.errors);
        self.warnings.extend(findings.warnings);
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_warnings_do_not_affect_validity() {
        let mut result = ValidationResult::new();
        result.push_warning("Subject sex not specified");
        assert!(result.is_valid());
        result.push_error("Missing required field: id");
        assert!(!result.is_valid());
    }

    #[test]
    fn test_absorb_appends_in_order() {
        let mut result = ValidationResult::new();
        result.push_error("first");
        result.absorb(TermFindings {
            errors: vec!["second".to_owned()],
            warnings: vec!["w".to_owned()],
        });
        assert_eq!(result.errors(), ["first", "second"]);
        assert_eq!(result.warnings(), ["w"]);
    }

    #[test]
    fn test_serialize_shape() {
        let mut result = ValidationResult::new();
        result.push_error("Missing required field: id");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "isValid": false,
                "errors": ["Missing required field: id"],
                "warnings": []
            })
        );
    }
}
