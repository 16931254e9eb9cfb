//! CLI integration tests
//!
//! These tests drive the built `gosert` binary against documents written
//! into a scratch directory and check stdout, stderr and exit status.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn gosert(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gosert"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_match_succeeds_with_exit_zero() {
    let dir = TempDir::new().unwrap();
    let expected = write(
        &dir,
        "expected.json",
        r#"{"id": "{{Not(BeEmpty())}}", "items": [{"_gst_id": "sku=a", "qty": 2}]}"#,
    );
    let actual = write(
        &dir,
        "actual.json",
        r#"{"id": "o-1", "items": [{"sku": "b", "qty": 9}, {"sku": "a", "qty": 2}]}"#,
    );

    let output = gosert(&["match", expected.to_str().unwrap(), actual.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        stderr(&output)
    );
    assert_eq!(stdout(&output).trim(), "match");
}

#[test]
fn test_mismatch_prints_failure_message_and_exits_one() {
    let dir = TempDir::new().unwrap();
    let expected = write(&dir, "expected.json", r#"{"a": {"b": "x"}}"#);
    let actual = write(&dir, "actual.json", r#"{"a": {"b": "y"}}"#);

    let output = gosert(&["match", expected.to_str().unwrap(), actual.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output).trim(),
        r#"path = .a.b, expected = "x", actual = "y""#
    );
}

#[test]
fn test_schema_error_exits_two() {
    let dir = TempDir::new().unwrap();
    let expected = write(
        &dir,
        "expected.json",
        r#"{"a": [{"_gst_index": 0}, {"_gst_id": "id=1"}]}"#,
    );
    let actual = write(&dir, "actual.json", r#"{"a": [{"id": 1}]}"#);

    let output = gosert(&["match", expected.to_str().unwrap(), actual.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Error: [ERR_SCHEMA_VIOLATION]"), "{}", err);
    assert!(err.contains("(path: .a)"), "{}", err);
}

#[test]
fn test_vars_flow_into_expected_document() {
    let dir = TempDir::new().unwrap();
    let expected = write(
        &dir,
        "expected.json",
        r#"{"at": "{{BeTimestamp(${{NOW}}, 1000)}}", "who": "${{USER}}"}"#,
    );
    let actual = write(
        &dir,
        "actual.json",
        r#"{"at": "2020-01-01T00:00:00.500Z", "who": "ethan"}"#,
    );
    let vars = write(&dir, "vars.json", r#"{"USER": "ethan"}"#);

    let output = gosert(&[
        "match",
        expected.to_str().unwrap(),
        actual.to_str().unwrap(),
        "--var",
        "NOW=2020-01-01T00:00:00.000Z",
        "--vars-file",
        vars.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
}

#[test]
fn test_undefined_variable_is_reported() {
    let dir = TempDir::new().unwrap();
    let expected = write(&dir, "expected.json", r#"{"a": "${{X}}"}"#);
    let actual = write(&dir, "actual.json", r#"{"a": "1"}"#);

    let output = gosert(&["match", expected.to_str().unwrap(), actual.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("variable 'X' undefined"));
}

#[test]
fn test_numeric_tolerance_flag() {
    let dir = TempDir::new().unwrap();
    let expected = write(&dir, "expected.json", r#"{"n": 10}"#);
    let actual = write(&dir, "actual.json", r#"{"n": 10.3}"#);
    let (expected, actual) = (expected.to_str().unwrap(), actual.to_str().unwrap());

    let default = gosert(&["match", expected, actual]);
    assert_eq!(default.status.code(), Some(1));

    let widened = gosert(&["match", expected, actual, "--numeric-tolerance", "0.5"]);
    assert!(widened.status.success(), "Stderr: {}", stderr(&widened));
}

#[test]
fn test_missing_actual_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let expected = write(&dir, "expected.json", "{}");
    let missing = dir.path().join("missing.json");

    let output = gosert(&["match", expected.to_str().unwrap(), missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[ERR_IO]"));
}

#[test]
fn test_substitute_to_stdout_and_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "fixture.json", r#"{"name": "${{NAME}}", "n": "{{BeEmpty()}}"}"#);

    let output = gosert(&["substitute", input.to_str().unwrap(), "--var", "NAME=Hunt"]);
    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), r#"{"name": "Hunt", "n": "{{BeEmpty()}}"}"#);

    let out_path = dir.path().join("out.json");
    let output = gosert(&[
        "substitute",
        input.to_str().unwrap(),
        "--var",
        "NAME=Hunt",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&out_path).unwrap(),
        r#"{"name": "Hunt", "n": "{{BeEmpty()}}"}"#
    );
}

#[test]
fn test_dev_logging_goes_to_stderr() {
    let dir = TempDir::new().unwrap();
    let expected = write(&dir, "expected.json", r#"{"a": 1}"#);
    let actual = write(&dir, "actual.json", r#"{"a": 1}"#);

    let output = gosert(&[
        "--log",
        "dev",
        "match",
        expected.to_str().unwrap(),
        actual.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "match");
}
