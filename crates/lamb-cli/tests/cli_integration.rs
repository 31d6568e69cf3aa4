//! Integration tests for the `lamb` binary.

use std::path::Path;
use std::process::{Command, Output};

fn lamb(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lamb"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("LAMB_LOG")
        .output()
        .expect("failed to run lamb")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ────────────────────────────────────────────────────────────────────────────
// check
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_check_clean_file_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.lam"), "f = lambda a, b : a * b ;\n").unwrap();

    let output = lamb(dir.path(), &["check", "--format", "plain"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("no issues found"));
}

#[test]
fn test_check_reports_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.lam"), "x lambda : 5 ;\n").unwrap();

    let output = lamb(dir.path(), &["check", "--format", "plain", "bad.lam"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("bad.lam: Insert: '=' at line 1, column 8"));
}

#[test]
fn test_check_inline_source() {
    let dir = tempfile::tempdir().unwrap();
    let output = lamb(
        dir.path(),
        &["check", "--format", "plain", "-e", "f = lambda : 1"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("<eval>: Insert: ';' at line 1, column 14"));
}

#[test]
fn test_check_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = lamb(
        dir.path(),
        &["check", "--format", "json", "-e", "na#me = lambda : 1 ;"],
    );
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let diagnostics = reports[0]["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["kind"]["class"], "lexical");
}

#[test]
fn test_check_pretty_output_goes_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let output = lamb(dir.path(), &["check", "-e", "x = lambda : ( 1 + 2 ;"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parentheses must balance"));
    assert!(stdout(&output).contains("1 diagnostic."));
}

#[test]
fn test_check_reads_manifest() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("lamb.toml"),
        "[analyzer]\ncolumns = \"line-relative\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("two.lam"),
        "f = lambda : 1 ;\ng = lambda : 2\n",
    )
    .unwrap();

    let output = lamb(dir.path(), &["check", "--format", "plain"]);
    assert!(stdout(&output).contains("Insert: ';' at line 2, column 14"));
}

#[test]
fn test_check_rejects_bad_manifest() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("lamb.toml"), "[analyzer]\nmax-errors = 0\n").unwrap();
    std::fs::write(dir.path().join("ok.lam"), "f = lambda : 1 ;\n").unwrap();

    let output = lamb(dir.path(), &["check"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("max-errors"));
}

#[test]
fn test_check_trace_prints_derivations() {
    let dir = tempfile::tempdir().unwrap();
    let output = lamb(
        dir.path(),
        &["check", "--format", "plain", "--trace", "-e", "f = lambda : 1 ;"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("<eval>: line 1: Statement Equals Lambda Argument"));
}

#[test]
fn test_check_without_sources_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = lamb(dir.path(), &["check"]);
    assert!(!output.status.success());
}

// ────────────────────────────────────────────────────────────────────────────
// tokens
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tokens_plain() {
    let dir = tempfile::tempdir().unwrap();
    let output = lamb(dir.path(), &["tokens", "-e", "f = 1"]);
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Identifier: 'f' at line 1, column 0");
    assert_eq!(lines[4], "Number: '1' at line 1, column 4");
}

#[test]
fn test_tokens_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.lam");
    std::fs::write(&path, "a@b").unwrap();

    let output = lamb(dir.path(), &["tokens", "--format", "json", "input.lam"]);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["tokens"][0]["kind"], "identifier");
    assert_eq!(report["tokens"][0]["text"], "a@b");
    assert_eq!(report["diagnostics"].as_array().unwrap().len(), 1);
}
