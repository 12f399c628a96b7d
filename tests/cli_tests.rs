//! End-to-end tests for the golden-runner binary
//!
//! `sh` stands in for the interpreter: it is invoked as `sh -f <file>`, which runs
//! each `*.in` file as a shell script with globbing disabled. The scripts print a
//! banner line first and exit with 255, like Inpla does.

#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_golden-runner");

/// A scratch workspace with the default `./test` and `./test/golden` layout.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("test")).unwrap();
    dir
}

/// Write a test input that prints the banner, then `lines`, then exits with `code`.
fn add_case(root: &Path, name: &str, lines: &[&str], code: i32) {
    let mut script = String::from("echo 'Inpla 0.10.0 : Interaction nets as a programming language'\n");
    for line in lines {
        script.push_str(&format!("echo '{}'\n", line));
    }
    script.push_str(&format!("exit {}\n", code));
    fs::write(root.join("test").join(format!("{name}.in")), script).unwrap();
}

fn golden(root: &Path, name: &str) -> std::path::PathBuf {
    root.join("test/golden").join(format!("{name}.golden"))
}

fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .arg("sh")
        .args(args)
        .current_dir(root)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// Generate mode
// ============================================================================

#[test]
fn test_generate_creates_golden_files() {
    let ws = workspace();
    add_case(ws.path(), "answer", &["(5 interactions, 0.01 sec)", "result=42"], 255);
    add_case(ws.path(), "list", &["[1,2,3]", "(12 interactions, 0.00 sec)", "done"], 255);

    let output = run(ws.path(), &["--mode", "generate"]);

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    assert_eq!(fs::read_to_string(golden(ws.path(), "answer")).unwrap(), "result=42");
    assert_eq!(fs::read_to_string(golden(ws.path(), "list")).unwrap(), "[1,2,3]\ndone");
    assert!(stdout(&output).contains("answer.in ... CREATED"));
}

#[test]
fn test_generate_twice_reports_unchanged() {
    let ws = workspace();
    add_case(ws.path(), "answer", &["result=42"], 255);

    assert_eq!(run(ws.path(), &["--mode", "generate"]).status.code(), Some(0));
    let second = run(ws.path(), &["--mode", "generate"]);

    assert_eq!(second.status.code(), Some(0));
    assert!(stdout(&second).contains("answer.in ... UNCHANGED"));
}

#[test]
fn test_generate_updates_changed_output() {
    let ws = workspace();
    add_case(ws.path(), "answer", &["result=43"], 255);
    fs::create_dir_all(ws.path().join("test/golden")).unwrap();
    fs::write(golden(ws.path(), "answer"), "result=42").unwrap();

    let output = run(ws.path(), &["--mode", "generate"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("answer.in ... UPDATED"));
    assert_eq!(fs::read_to_string(golden(ws.path(), "answer")).unwrap(), "result=43");
}

// ============================================================================
// Compare mode
// ============================================================================

#[test]
fn test_compare_after_generate_passes() {
    let ws = workspace();
    add_case(ws.path(), "a", &["one"], 255);
    add_case(ws.path(), "b", &["two", "(1 interactions, 0.00 sec)"], 255);

    assert_eq!(run(ws.path(), &["--mode", "generate"]).status.code(), Some(0));
    let output = run(ws.path(), &[]);

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    let out = stdout(&output);
    assert!(out.contains("a.in ... OK"));
    assert!(out.contains("b.in ... OK"));
    assert!(out.contains("2 passed, 0 failed, 2 total"));
}

#[test]
fn test_compare_missing_golden_fails() {
    let ws = workspace();
    add_case(ws.path(), "foo", &["result=42"], 255);

    let output = run(ws.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("foo.in ... FAILED"));
    assert!(out.contains("golden file not found: ./test/golden/foo.golden"));
    assert!(out.contains("0 passed, 1 failed, 1 total"));
}

#[test]
fn test_compare_reports_first_mismatch() {
    let ws = workspace();
    add_case(ws.path(), "abc", &["a", "x", "c"], 255);
    fs::create_dir_all(ws.path().join("test/golden")).unwrap();
    fs::write(golden(ws.path(), "abc"), "a\nb\nc\n").unwrap();

    let output = run(ws.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("first difference at line 2"));
    assert!(out.contains("expected: b"));
    assert!(out.contains("actual:   x"));
}

#[test]
fn test_compare_reports_extra_output_as_eof() {
    let ws = workspace();
    add_case(ws.path(), "ab", &["a", "b", "c"], 255);
    fs::create_dir_all(ws.path().join("test/golden")).unwrap();
    fs::write(golden(ws.path(), "ab"), "a\nb").unwrap();

    let output = run(ws.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("first difference at line 2"));
    assert!(out.contains("expected: <EOF>"));
    assert!(out.contains("actual:   c"));
}

#[test]
fn test_compare_ignores_crlf_in_golden() {
    let ws = workspace();
    add_case(ws.path(), "lines", &["a", "b"], 255);
    fs::create_dir_all(ws.path().join("test/golden")).unwrap();
    fs::write(golden(ws.path(), "lines"), "a\r\nb\r\n").unwrap();

    let output = run(ws.path(), &[]);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
}

// ============================================================================
// Process failures
// ============================================================================

#[test]
fn test_non_sentinel_exit_blocks_generation() {
    let ws = workspace();
    add_case(ws.path(), "good", &["fine"], 255);
    add_case(ws.path(), "bad", &["partial"], 1);

    let output = run(ws.path(), &["--mode", "generate"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("bad.in ... ERROR"));
    assert!(out.contains("interpreter exited with code 1"));
    assert!(out.contains("1 of 2 test file(s) could not be run"));
    assert!(!golden(ws.path(), "good").exists());
}

#[test]
fn test_process_failure_is_reported_once() {
    let ws = workspace();
    add_case(ws.path(), "bad", &["partial"], 3);

    // Default log filter, as a user would run it.
    let output = Command::new(BIN)
        .arg("sh")
        .current_dir(ws.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).matches("interpreter exited with code 3").count(), 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("interpreter run failed"), "stderr: {}", stderr);
}

#[test]
fn test_zero_exit_is_a_failure_with_default_sentinel() {
    let ws = workspace();
    add_case(ws.path(), "zero", &["x"], 0);

    let output = run(ws.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("interpreter exited with code 0"));
}

#[test]
fn test_custom_success_code() {
    let ws = workspace();
    add_case(ws.path(), "zero", &["x"], 0);

    let output = run(ws.path(), &["--success-code", "0", "--mode", "generate"]);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    assert_eq!(fs::read_to_string(golden(ws.path(), "zero")).unwrap(), "x");
}

#[test]
fn test_missing_interpreter() {
    let ws = workspace();
    add_case(ws.path(), "foo", &["x"], 255);

    let output = Command::new(BIN)
        .arg("/definitely/not/an/interpreter")
        .current_dir(ws.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("failed to start interpreter"));
}

// ============================================================================
// CLI surface
// ============================================================================

#[test]
fn test_verbose_prints_invocation() {
    let ws = workspace();
    add_case(ws.path(), "foo", &["x"], 255);

    let output = run(ws.path(), &["--verbose", "--mode", "generate"]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Running: sh -f \"./test/foo.in\""), "stderr: {}", stderr);
}

#[test]
fn test_custom_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("cases")).unwrap();
    fs::write(dir.path().join("cases/one.in"), "echo banner\necho 1\nexit 255\n").unwrap();

    let output = run(
        dir.path(),
        &["--test-dir", "cases", "--golden-dir", "expected", "--mode", "generate"],
    );

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(dir.path().join("expected/one.golden")).unwrap(), "1");
}

#[test]
fn test_empty_corpus_fails() {
    let ws = workspace();
    let output = run(ws.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no *.in test files found"));
}

#[test]
fn test_missing_interpreter_argument_exits_one() {
    let output = Command::new(BIN).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_mode_exits_one() {
    let ws = workspace();
    let output = run(ws.path(), &["--mode", "bogus"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let output = Command::new(BIN).arg("--help").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("INTERPRETER"));
}
