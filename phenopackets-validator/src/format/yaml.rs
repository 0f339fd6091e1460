//! YAML document loader.
//!
//! YAML documents are deserialized into `serde_json::Value` so they go
//! through exactly the same validation as JSON input.

use std::path::Path;

use serde_json::Value;

use crate::error::{ScanError, ScanErrorKind};
use crate::format::LoadedDocument;

/// `true` when a segment holds nothing but blank lines and comments, the way
/// a file header before the first `---` does. The stream parser yields no
/// document for such a segment, so neither may the fallback.
fn is_empty_segment(segment: &str) -> bool {
    segment.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn split_yaml_documents(content: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current_doc: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim() == "---" {
            let doc = current_doc.join("\n");
            if !is_empty_segment(&doc) {
                documents.push(doc);
            }
            current_doc.clear();
            continue;
        }
        current_doc.push(line);
    }

    let doc = current_doc.join("\n");
    if !is_empty_segment(&doc) {
        documents.push(doc);
    }

    documents
}

fn indexed(values: Vec<Value>) -> Vec<LoadedDocument> {
    let multi = values.len() > 1;
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| LoadedDocument {
            index: multi.then_some(i),
            value,
        })
        .collect()
}

/// Parse YAML content into the documents of its stream.
///
/// Returns `(documents, scan_errors)`:
/// - `documents`: every document that parsed.
/// - `scan_errors`: per-document parse failures in a multi-document stream,
///   or one file-level failure if nothing parsed at all.
///
/// A malformed document never hides its valid siblings.
pub fn load_yaml_documents(content: &str, path: &Path) -> (Vec<LoadedDocument>, Vec<ScanError>) {
    let stream_err = match serde_saphyr::from_multiple::<Value>(content) {
        Ok(docs) => return (indexed(docs), Vec::new()),
        Err(e) => e,
    };

    let segments = split_yaml_documents(content);
    let multi = segments.len() > 1;
    let mut documents = Vec::new();
    let mut scan_errors = Vec::new();

    for (idx, segment) in segments.iter().enumerate() {
        match serde_saphyr::from_str::<Value>(segment) {
            Ok(value) => documents.push(LoadedDocument {
                index: multi.then_some(idx),
                value,
            }),
            Err(doc_err) => scan_errors.push(ScanError::new(
                path,
                ScanErrorKind::YamlParseError,
                format!(
                    "YAML parse error in document {} of multi-document stream: {doc_err}",
                    idx + 1
                ),
            )),
        }
    }

    if documents.is_empty() {
        // Nothing parsed: one file-level error reads better than N copies.
        scan_errors.clear();
        scan_errors.push(ScanError::new(
            path,
            ScanErrorKind::YamlParseError,
            format!("YAML parse error: {stream_err}"),
        ));
    }

    (documents, scan_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_document() {
        let (docs, errs) = load_yaml_documents(
            "id: p1\nsubject:\n  id: s1\n",
            Path::new("p.yaml"),
        );
        assert!(errs.is_empty());
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].index, None);
        assert_eq!(docs[0].value["subject"]["id"], json!("s1"));
    }

    #[test]
    fn test_multi_document_stream() {
        let (docs, errs) = load_yaml_documents("id: p1\n---\nid: p2\n", Path::new("p.yaml"));
        assert!(errs.is_empty());
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].index, Some(0));
        assert_eq!(docs[1].value["id"], json!("p2"));
    }

    #[test]
    fn test_bad_document_keeps_good_siblings() {
        let content = "id: p1\n---\nid: [unclosed\n---\nid: p3\n";
        let (docs, errs) = load_yaml_documents(content, Path::new("p.yaml"));
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].index, Some(2));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ScanErrorKind::YamlParseError);
        assert!(errs[0].message.contains("document 2"), "got: {}", errs[0].message);
    }

    #[test]
    fn test_unparseable_file_is_one_error() {
        let (docs, errs) = load_yaml_documents("id: [unclosed\n", Path::new("p.yaml"));
        assert!(docs.is_empty());
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.starts_with("YAML parse error:"));
    }

    #[test]
    fn test_comment_header_is_not_a_document() {
        let content = "# header\n---\nid: p1\n---\nid: [bad\n";
        let (docs, errs) = load_yaml_documents(content, Path::new("p.yaml"));
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].index, Some(0));
        assert_eq!(docs[0].value, json!({"id": "p1"}));
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("document 2"), "got: {}", errs[0].message);
    }

    #[test]
    fn test_comment_header_with_valid_documents() {
        let content = "# header\n---\nid: p1\n---\nid: p2\n";
        let (docs, errs) = load_yaml_documents(content, Path::new("p.yaml"));
        assert!(errs.is_empty());
        let ids: Vec<_> = docs.iter().map(|d| (d.index, d.value["id"].clone())).collect();
        assert_eq!(ids, [(Some(0), json!("p1")), (Some(1), json!("p2"))]);
    }

    #[test]
    fn test_split_skips_comment_only_segments() {
        let docs = split_yaml_documents("# header\n\n---\na: 1\n---\n# trailing\n");
        assert_eq!(docs, ["a: 1"]);
    }

    #[test]
    fn test_split_skips_blank_documents() {
        let docs = split_yaml_documents("---\na: 1\n---\n\n---\nb: 2\n");
        assert_eq!(docs, ["a: 1", "b: 2"]);
    }
}
