//! Integration tests for the `treeops` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run every subcommand
//! through the actual binary, covering stdin and file input, output files,
//! both adapter modes, partial results and error exits.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

const BASE_JSON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/base.json");
const OVERRIDE_JSON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/override.json");
const LIST_JSON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/list.json");

fn treeops() -> Command {
    Command::cargo_bin("treeops").unwrap()
}

/// Run a command that must succeed and parse its stdout as JSON.
fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .cloned()
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// merge
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn merge_two_files() {
    let merged = run_json(treeops().args(["merge", BASE_JSON, OVERRIDE_JSON]));
    assert_eq!(
        merged,
        json!({
            "name": "Alice",
            "age": 31,
            "tags": ["ops"],
            "settings": {"theme": "dark"},
            "email": "alice@example.com"
        })
    );
    assert_eq!(keys(&merged), ["name", "age", "tags", "settings", "email"]);
}

#[test]
fn merge_null_with_stdin() {
    let merged = run_json(
        treeops()
            .args(["merge", "-", LIST_JSON])
            .write_stdin("null"),
    );
    assert_eq!(merged, json!([1, 2, 3]));
}

#[test]
fn merge_arrays_concatenates() {
    let merged = run_json(
        treeops()
            .args(["merge", LIST_JSON, "-"])
            .write_stdin("[4]"),
    );
    assert_eq!(merged, json!([1, 2, 3, 4]));
}

#[test]
fn merge_incompatible_documents_fails() {
    treeops()
        .args(["merge", BASE_JSON, LIST_JSON])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not merge"));
}

#[test]
fn merge_rejects_two_stdin_inputs() {
    treeops()
        .args(["merge", "-", "-"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin"));
}

// ─────────────────────────────────────────────────────────────────────────────
// merge-entry
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn merge_entry_keeps_existing_value() {
    let result = run_json(treeops().args([
        "merge-entry",
        BASE_JSON,
        "--key",
        "name",
        "--value",
        "\"Bob\"",
    ]));
    assert_eq!(result["name"], json!("Alice"));
}

#[test]
fn merge_entry_new_key_goes_first() {
    let result = run_json(
        treeops()
            .args(["merge-entry", "-", "--key", "b", "--value", "2"])
            .write_stdin(r#"{"a":1}"#),
    );
    assert_eq!(result, json!({"b": 2, "a": 1}));
    assert_eq!(keys(&result), ["b", "a"]);
}

#[test]
fn merge_entry_bulk_new_values_win() {
    let result = run_json(
        treeops()
            .args(["merge-entry", "-", "--bulk", "--value", r#"[["a",2],["c",3]]"#])
            .write_stdin(r#"{"a":1}"#),
    );
    assert_eq!(result, json!({"a": 2, "c": 3}));
}

#[test]
fn merge_entry_bulk_invalid_key_fails() {
    treeops()
        .args(["merge-entry", "-", "--bulk", "--value", r#"[["a",1],[5,2]]"#])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("some keys are not strings: [5]"));
}

#[test]
fn merge_entry_bulk_allow_partial_prints_valid_entries() {
    treeops()
        .args([
            "--allow-partial",
            "merge-entry",
            "-",
            "--bulk",
            "--value",
            r#"[["a",1],[5,2]]"#,
        ])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"a\": 1"))
        .stderr(predicate::str::contains("some keys are not strings"));
}

#[test]
fn merge_entry_numeric_key_strict_fails() {
    treeops()
        .args(["merge-entry", "-", "--key", "7", "--key-json", "--value", "true"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("key is not a string: 7"));
}

#[test]
fn merge_entry_numeric_key_compressed() {
    let result = run_json(
        treeops()
            .args([
                "--compressed",
                "merge-entry",
                "-",
                "--key",
                "7",
                "--key-json",
                "--value",
                "true",
            ])
            .write_stdin("{}"),
    );
    assert_eq!(result, json!({"7": true}));
}

#[test]
fn merge_entry_requires_key_or_bulk() {
    treeops()
        .args(["merge-entry", "-", "--value", "1"])
        .write_stdin("{}")
        .assert()
        .failure();
}

#[test]
fn merge_entry_rejects_invalid_value_json() {
    treeops()
        .args(["merge-entry", "-", "--key", "a", "--value", "not json"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--value"));
}

// ─────────────────────────────────────────────────────────────────────────────
// append
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn append_to_list() {
    let result = run_json(treeops().args(["append", LIST_JSON, "--value", "4"]));
    assert_eq!(result, json!([1, 2, 3, 4]));
}

#[test]
fn append_to_null_creates_list() {
    let result = run_json(
        treeops()
            .args(["append", "-", "--value", r#"{"id":1}"#])
            .write_stdin("null"),
    );
    assert_eq!(result, json!([{"id": 1}]));
}

#[test]
fn append_to_object_fails() {
    treeops()
        .args(["append", BASE_JSON, "--value", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a list"));
}

#[test]
fn append_to_object_allow_partial_returns_input() {
    let result = run_json(treeops().args([
        "--allow-partial",
        "append",
        BASE_JSON,
        "--value",
        "4",
    ]));
    assert_eq!(keys(&result), ["name", "age", "tags", "settings"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// remove / get / kind
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn remove_key_keeps_order() {
    let result = run_json(treeops().args(["remove", BASE_JSON, "--key", "age"]));
    assert_eq!(keys(&result), ["name", "tags", "settings"]);
}

#[test]
fn remove_on_list_is_noop() {
    let result = run_json(treeops().args(["remove", LIST_JSON, "--key", "age"]));
    assert_eq!(result, json!([1, 2, 3]));
}

#[test]
fn get_existing_key() {
    let result = run_json(treeops().args(["get", BASE_JSON, "--key", "settings"]));
    assert_eq!(result, json!({"theme": "dark"}));
}

#[test]
fn get_missing_key_fails() {
    treeops()
        .args(["get", BASE_JSON, "--key", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key not found"));
}

#[test]
fn get_on_list_fails() {
    treeops()
        .args(["get", LIST_JSON, "--key", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a map"));
}

#[test]
fn kind_of_documents() {
    treeops()
        .args(["kind", BASE_JSON])
        .assert()
        .success()
        .stdout("object\n");
    treeops()
        .args(["kind", LIST_JSON])
        .assert()
        .success()
        .stdout("array\n");
    for (input, kind) in [
        ("42", "int"),
        ("5000000000", "long"),
        ("1.5", "double"),
        ("\"x\"", "string"),
        ("true", "bool"),
        ("null", "null"),
    ] {
        treeops()
            .args(["kind", "-"])
            .write_stdin(input)
            .assert()
            .success()
            .stdout(format!("{}\n", kind));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// I/O
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn output_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("merged.json");

    treeops()
        .args(["merge", BASE_JSON, OVERRIDE_JSON, "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&out).expect("output file must exist");
    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["age"], json!(31));
}

#[test]
fn invalid_json_input_fails() {
    treeops()
        .args(["kind", "-"])
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON from stdin"));
}

#[test]
fn missing_file_fails() {
    treeops()
        .args(["kind", "/nonexistent/treeops.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn no_subcommand_shows_usage() {
    treeops()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
