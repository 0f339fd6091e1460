//! Skeleton documents for authoring new phenopackets.

use serde_json::{Map, Value, json};

use crate::schema::SchemaVersion;
use crate::timestamp::{Timestamp, TimestampError};

/// `metaData.phenopacketSchemaVersion` written by [`stamp_meta_data`].
const SCHEMA_VERSION_LABEL_V1: &str = "1.0";
const SCHEMA_VERSION_LABEL_V2: &str = "2.0";

/// An empty phenopacket with every top-level list in place.
///
/// Identifiers are empty strings, so the skeleton does not validate until it
/// has been filled in.
#[must_use]
pub fn empty_phenopacket(version: SchemaVersion) -> Value {
    match version {
        SchemaVersion::V2 => json!({
            "id": "",
            "subject": {
                "id": "",
                "sex": 0
            },
            "phenotypicFeaturesList": [],
            "diseasesList": [],
            "biosamplesList": [],
            "interpretationsList": []
        }),
        SchemaVersion::V1 => json!({
            "id": "",
            "subject": {
                "id": ""
            },
            "phenotypicFeatures": [],
            "diseases": [],
            "biosamples": []
        }),
    }
}

/// Insert a `metaData` block (creation time, author, empty resource list).
///
/// Replaces an existing `metaData`. Does nothing when `document` is not a
/// mapping.
///
/// # Errors
///
/// Returns [`TimestampError`] if `created` cannot be rendered as RFC 3339.
pub fn stamp_meta_data(
    document: &mut Value,
    version: SchemaVersion,
    created: Timestamp,
    created_by: &str,
) -> Result<(), TimestampError> {
    let Value::Object(map) = document else {
        return Ok(());
    };

    let label = match version {
        SchemaVersion::V1 => SCHEMA_VERSION_LABEL_V1,
        SchemaVersion::V2 => SCHEMA_VERSION_LABEL_V2,
    };

    let mut meta = Map::new();
    meta.insert("created".to_owned(), Value::String(created.to_rfc3339()?));
    meta.insert("createdBy".to_owned(), Value::String(created_by.to_owned()));
    meta.insert("resources".to_owned(), Value::Array(Vec::new()));
    meta.insert(
        "phenopacketSchemaVersion".to_owned(),
        Value::String(label.to_owned()),
    );
    map.insert("metaData".to_owned(), Value::Object(meta));
    Ok(())
}
