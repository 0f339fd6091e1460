#![allow(clippy::unwrap_used)]
//! Tests for the `validate`, `check-term` and `template` subcommands.

use std::fs;

use clap::Parser;
use phenopackets_cli::cli::{Cli, Commands, cmd_check_term, cmd_template, cmd_validate};
use serde_json::{Value, json};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> (bool, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let ok = match &cli.command {
        Commands::Validate(a) => cmd_validate(a, &mut out).unwrap(),
        Commands::CheckTerm(a) => cmd_check_term(a, &mut out).unwrap(),
        Commands::Template(a) => cmd_template(a, &mut out).unwrap(),
        Commands::Server(_) => panic!("server is not run in tests"),
    };
    (ok, String::from_utf8(out).unwrap())
}

#[test]
fn test_validate_json_output() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("p.json"), r#"{"subject": {}}"#).unwrap();
    let dir = tmp.path().to_str().unwrap();

    let (ok, out) = run_command(&["phenopackets", "validate", "--format", "json", dir]);
    assert!(!ok);
    let report: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["ok"], json!(false));
    assert_eq!(report["scanned_files"], json!(1));
    assert_eq!(
        report["documents"][0]["result"]["errors"][0],
        json!("Missing required field: id")
    );
}

#[test]
fn test_validate_human_output_warnings_as_errors() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("p.yaml"),
        "id: p1\nmetaData:\n  created: '2024-01-01T00:00:00Z'\n  createdBy: c\n  resources: []\n",
    )
    .unwrap();
    let dir = tmp.path().to_str().unwrap();

    let (ok, out) = run_command(&["phenopackets", "validate", dir]);
    assert!(ok);
    assert!(out.contains("warning: No subject information provided"), "got: {out}");

    let (ok, _) = run_command(&["phenopackets", "validate", "--warnings-as-errors", dir]);
    assert!(!ok);
}

#[test]
fn test_validate_missing_path_is_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");
    let cli = Cli::try_parse_from(["phenopackets", "validate", missing.to_str().unwrap()]).unwrap();
    let Commands::Validate(args) = cli.command else {
        panic!("expected validate");
    };
    let err = cmd_validate(&args, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_check_term_reports_curie() {
    let (ok, out) = run_command(&[
        "phenopackets",
        "check-term",
        r#"{"id": "HP:0001513", "label": "Obesity"}"#,
        "--path",
        "phenotypicFeaturesList[0].type",
    ]);
    assert!(ok);
    let body: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(body["path"], json!("phenotypicFeaturesList[0].type"));
    assert_eq!(body["errors"], json!([]));
    assert_eq!(body["warnings"], json!([]));
    assert_eq!(body["curie"], json!({"prefix": "HP", "reference": "0001513"}));
}

#[test]
fn test_check_term_errors() {
    let (ok, out) = run_command(&["phenopackets", "check-term", r#"{"id": 7}"#]);
    assert!(!ok);
    let body: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(body["errors"], json!(["term.id must be a string"]));
    assert_eq!(body["curie"], Value::Null);
}

#[test]
fn test_template_v2() {
    let (ok, out) = run_command(&["phenopackets", "template"]);
    assert!(ok);
    let doc: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["subject"], json!({"id": "", "sex": 0}));
    assert_eq!(doc["interpretationsList"], json!([]));
    assert!(doc.get("metaData").is_none());
}

#[test]
fn test_template_with_meta_data() {
    let (_, out) = run_command(&["phenopackets", "template", "--created-by", "curator", "--pretty"]);
    assert!(out.contains("\n  "), "expected pretty output");
    let doc: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(doc["metaData"]["createdBy"], json!("curator"));
    assert_eq!(doc["metaData"]["phenopacketSchemaVersion"], json!("2.0"));
    assert!(doc["metaData"]["created"].as_str().unwrap().ends_with('Z'));
}
