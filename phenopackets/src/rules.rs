//! Declarative rule tables, one per schema version.
//!
//! Each table is an ordered list of [`FieldRule`]s. The walk in
//! [`validator`](crate::validator) interprets the tables and owns all
//! message formatting; adding a check means adding a row here, not a branch
//! there. Table order is finding order.

use crate::schema::SchemaVersion;

/// How strongly a field is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Absence is an error.
    Required,
    /// Absence is a warning.
    Recommended,
    /// Absence is fine; the field is only checked when present.
    Optional,
}

/// What "present" means for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Present when the value is truthy (see [`is_truthy`](crate::document::is_truthy)).
    Truthy,
    /// Present when the key exists, whatever its value.
    Defined,
}

/// Expected shape of a present field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// No shape constraint.
    Any,
    /// A string scalar.
    String,
    /// A mapping.
    Object,
    /// A sequence.
    Array,
    /// An ontology-term mapping, checked by
    /// [`validate_ontology_term`](crate::validate_ontology_term).
    OntologyTerm,
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Makes the document invalid.
    Error,
    /// Advisory only.
    Warning,
}

/// Rules applied to every element of a sequence field.
#[derive(Debug, Clone, Copy)]
pub struct ElementRules {
    /// Message-facing name of one element (`PhenotypicFeature`).
    pub label: &'static str,
    /// Rules for each element's fields.
    pub fields: &'static [FieldRule],
}

/// One row of a rule table.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Field name; may be a dotted path (`sampleType.id`).
    pub name: &'static str,
    pub requirement: Requirement,
    pub presence: Presence,
    pub shape: Shape,
    /// Severity of a shape mismatch.
    pub shape_severity: Severity,
    /// Replaces the generated message for an absent field.
    pub missing_message: Option<&'static str>,
    /// Replaces the generated message for a shape mismatch.
    pub shape_message: Option<&'static str>,
    /// Rules for the fields of a mapping value.
    pub fields: &'static [FieldRule],
    /// Rules for the elements of a sequence value.
    pub elements: Option<&'static ElementRules>,
}

impl FieldRule {
    /// An optional field with no constraints.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            requirement: Requirement::Optional,
            presence: Presence::Truthy,
            shape: Shape::Any,
            shape_severity: Severity::Error,
            missing_message: None,
            shape_message: None,
            fields: &[],
            elements: None,
        }
    }

    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            requirement: Requirement::Required,
            ..self
        }
    }

    #[must_use]
    pub const fn recommended(self) -> Self {
        Self {
            requirement: Requirement::Recommended,
            ..self
        }
    }

    /// Count the field as present as soon as its key exists.
    #[must_use]
    pub const fn defined(self) -> Self {
        Self {
            presence: Presence::Defined,
            ..self
        }
    }

    #[must_use]
    pub const fn shape(self, shape: Shape) -> Self {
        Self { shape, ..self }
    }

    /// Downgrade shape mismatches to warnings.
    #[must_use]
    pub const fn lenient_shape(self) -> Self {
        Self {
            shape_severity: Severity::Warning,
            ..self
        }
    }

    #[must_use]
    pub const fn missing_message(self, message: &'static str) -> Self {
        Self {
            missing_message: Some(message),
            ..self
        }
    }

    /// Use one message for both absence and shape mismatch.
    #[must_use]
    pub const fn advice(self, message: &'static str) -> Self {
        Self {
            missing_message: Some(message),
            shape_message: Some(message),
            ..self
        }
    }

    #[must_use]
    pub const fn fields(self, fields: &'static [FieldRule]) -> Self {
        Self { fields, ..self }
    }

    #[must_use]
    pub const fn elements(self, elements: &'static ElementRules) -> Self {
        Self {
            elements: Some(elements),
            ..self
        }
    }
}

const META_DATA_FIELDS: &[FieldRule] = &[
    FieldRule::new("created").required(),
    FieldRule::new("createdBy").required(),
    // TODO: confirm with the schema owners whether a missing resources list
    // should block; it has been treated both ways over time.
    FieldRule::new("resources")
        .recommended()
        .shape(Shape::Array)
        .lenient_shape()
        .advice("metaData.resources should be an array of ontology resources"),
];

const SUBJECT_FIELDS: &[FieldRule] = &[
    FieldRule::new("id").required(),
    FieldRule::new("sex")
        .recommended()
        .defined()
        .missing_message("Subject sex not specified"),
];

const PHENOTYPIC_FEATURE: ElementRules = ElementRules {
    label: "PhenotypicFeature",
    fields: &[
        FieldRule::new("type").required().shape(Shape::OntologyTerm),
        FieldRule::new("onset").shape(Shape::OntologyTerm),
    ],
};

const DISEASE: ElementRules = ElementRules {
    label: "Disease",
    fields: &[
        FieldRule::new("term").required().shape(Shape::OntologyTerm),
        FieldRule::new("diseaseStage").shape(Shape::OntologyTerm),
    ],
};

const BIOSAMPLE: ElementRules = ElementRules {
    label: "Biosample",
    fields: &[
        FieldRule::new("id").required(),
        FieldRule::new("sampleType.id").recommended(),
    ],
};

/// Phenopacket schema 2.x.
pub const V2_RULES: &[FieldRule] = &[
    FieldRule::new("id").required().shape(Shape::String),
    FieldRule::new("metaData").required().fields(META_DATA_FIELDS),
    FieldRule::new("subject")
        .recommended()
        .missing_message("No subject information provided")
        .shape(Shape::Object)
        .fields(SUBJECT_FIELDS),
    FieldRule::new("phenotypicFeaturesList")
        .shape(Shape::Array)
        .elements(&PHENOTYPIC_FEATURE),
    FieldRule::new("diseasesList")
        .shape(Shape::Array)
        .elements(&DISEASE),
    FieldRule::new("biosamplesList")
        .shape(Shape::Array)
        .elements(&BIOSAMPLE),
];

/// Phenopacket schema 1.x. Only the identifier is checked; v1 coverage has
/// never gone further and is kept that way rather than guessed at.
pub const V1_RULES: &[FieldRule] = &[FieldRule::new("id").required()];

/// The rule table for a schema version.
#[must_use]
pub fn rules_for(version: SchemaVersion) -> &'static [FieldRule] {
    match version {
        SchemaVersion::V1 => V1_RULES,
        SchemaVersion::V2 => V2_RULES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[FieldRule]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_v2_top_level_order() {
        assert_eq!(
            names(rules_for(SchemaVersion::V2)),
            [
                "id",
                "metaData",
                "subject",
                "phenotypicFeaturesList",
                "diseasesList",
                "biosamplesList"
            ]
        );
    }

    #[test]
    fn test_v1_only_checks_id() {
        let rules = rules_for(SchemaVersion::V1);
        assert_eq!(names(rules), ["id"]);
        assert_eq!(rules[0].requirement, Requirement::Required);
        assert_eq!(rules[0].shape, Shape::Any);
    }

    #[test]
    fn test_list_rules_carry_element_labels() {
        let labels: Vec<&str> = rules_for(SchemaVersion::V2)
            .iter()
            .filter_map(|r| r.elements.map(|e| e.label))
            .collect();
        assert_eq!(labels, ["PhenotypicFeature", "Disease", "Biosample"]);
    }

    #[test]
    fn test_resources_is_a_warning_rule() {
        let meta = rules_for(SchemaVersion::V2)
            .iter()
            .find(|r| r.name == "metaData")
            .map(|r| r.fields)
            .unwrap_or_default();
        let resources = meta.iter().find(|r| r.name == "resources");
        assert!(resources.is_some_and(|r| r.requirement == Requirement::Recommended
            && r.shape_severity == Severity::Warning));
    }
}
