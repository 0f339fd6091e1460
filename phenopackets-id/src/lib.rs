//! CURIE parsing primitives for ontology references.
//!
//! Ontology terms in phenopackets carry compact identifiers of the form
//! `prefix:reference` (for example `HP:0000118` or `MONDO:0005157`). This
//! crate holds the single definition of that shape, used by the structural
//! validator for its lenient separator check and by tooling that needs the
//! parsed parts.

use std::fmt;

use thiserror::Error;

/// Separator between the prefix and the local reference.
pub const CURIE_SEPARATOR: char = ':';

/// Example identifier quoted in diagnostics.
pub const CURIE_EXAMPLE: &str = "HP:0000118";

/// Maximum accepted length of a CURIE string.
pub const CURIE_MAX_LENGTH: usize = 512;

/// Errors from strict CURIE parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurieError {
    /// The identifier contains no `:` separator.
    #[error("missing '{}' separator (expected e.g. '{}')", CURIE_SEPARATOR, CURIE_EXAMPLE)]
    MissingSeparator,

    /// Nothing precedes the separator.
    #[error("empty prefix")]
    EmptyPrefix,

    /// Nothing follows the separator.
    #[error("empty reference after prefix '{prefix}'")]
    EmptyReference {
        /// The prefix that was found.
        prefix: String,
    },

    /// The prefix contains characters outside the accepted set.
    #[error("invalid prefix '{prefix}': must start with a letter and contain only [A-Za-z0-9_.-]")]
    InvalidPrefix {
        /// The offending prefix.
        prefix: String,
    },

    /// The reference contains whitespace.
    #[error("reference '{reference}' must not contain whitespace")]
    WhitespaceInReference {
        /// The offending reference.
        reference: String,
    },

    /// The identifier is longer than [`CURIE_MAX_LENGTH`].
    #[error("identifier exceeds maximum length of {} characters", CURIE_MAX_LENGTH)]
    TooLong,
}

/// A borrowed, successfully parsed CURIE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curie<'a> {
    /// Ontology prefix, e.g. `HP`.
    pub prefix: &'a str,
    /// Local identifier within the ontology, e.g. `0000118`.
    pub reference: &'a str,
}

impl fmt::Display for Curie<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{CURIE_SEPARATOR}{}", self.prefix, self.reference)
    }
}

/// Lenient check used by structural validation: does the identifier contain
/// a `:` separator at all?
#[inline]
#[must_use]
pub fn has_separator(id: &str) -> bool {
    id.contains(CURIE_SEPARATOR)
}

/// Validates a prefix token without regex.
///
/// Valid prefixes start with an ASCII letter, followed by `[A-Za-z0-9_.-]*`.
#[inline]
#[must_use]
pub fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Parse a CURIE strictly.
///
/// The split happens at the first `:`, so references may themselves contain
/// colons (`NCIT:C3117:x` has reference `C3117:x`).
///
/// # Errors
/// Returns [`CurieError`] describing the first problem found.
pub fn parse_curie(id: &str) -> Result<Curie<'_>, CurieError> {
    if id.len() > CURIE_MAX_LENGTH {
        return Err(CurieError::TooLong);
    }

    let Some((prefix, reference)) = id.split_once(CURIE_SEPARATOR) else {
        return Err(CurieError::MissingSeparator);
    };

    if prefix.is_empty() {
        return Err(CurieError::EmptyPrefix);
    }
    if !is_valid_prefix(prefix) {
        return Err(CurieError::InvalidPrefix {
            prefix: prefix.to_owned(),
        });
    }
    if reference.is_empty() {
        return Err(CurieError::EmptyReference {
            prefix: prefix.to_owned(),
        });
    }
    if reference.chars().any(char::is_whitespace) {
        return Err(CurieError::WhitespaceInReference {
            reference: reference.to_owned(),
        });
    }

    Ok(Curie { prefix, reference })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_has_separator() {
        assert!(has_separator("HP:0000118"));
        assert!(has_separator(":"));
        assert!(!has_separator("HP0000118"));
        assert!(!has_separator(""));
    }

    #[test]
    fn test_parse_hpo_term() {
        let curie = parse_curie("HP:0000118").unwrap();
        assert_eq!(curie.prefix, "HP");
        assert_eq!(curie.reference, "0000118");
        assert_eq!(curie.to_string(), "HP:0000118");
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let curie = parse_curie("NCIT:C3117:x").unwrap();
        assert_eq!(curie.prefix, "NCIT");
        assert_eq!(curie.reference, "C3117:x");
    }

    #[test]
    fn test_parse_dotted_prefix() {
        let curie = parse_curie("ensembl.transcript:ENST00000357654").unwrap();
        assert_eq!(curie.prefix, "ensembl.transcript");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert_eq!(parse_curie("HP0000118"), Err(CurieError::MissingSeparator));
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert_eq!(parse_curie(":0000118"), Err(CurieError::EmptyPrefix));
        assert_eq!(
            parse_curie("HP:"),
            Err(CurieError::EmptyReference {
                prefix: "HP".to_owned()
            })
        );
    }

    #[test]
    fn test_parse_rejects_bad_prefix() {
        let err = parse_curie("1HP:0000118").unwrap_err();
        assert!(matches!(err, CurieError::InvalidPrefix { ref prefix } if prefix == "1HP"));
        assert!(parse_curie("H P:1").is_err());
    }

    #[test]
    fn test_parse_rejects_whitespace_reference() {
        let err = parse_curie("HP:00 118").unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = format!("HP:{}", "1".repeat(CURIE_MAX_LENGTH));
        assert_eq!(parse_curie(&long), Err(CurieError::TooLong));
    }

    #[test]
    fn test_missing_separator_message_mentions_example() {
        let msg = CurieError::MissingSeparator.to_string();
        assert!(msg.contains(CURIE_EXAMPLE), "got: {msg}");
    }
}
