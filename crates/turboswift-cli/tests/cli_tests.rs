//! Integration tests for the TurboSwift CLI
//!
//! These tests invoke the actual turboswift binary and verify:
//! - Exit codes (0 = success, 1 = findings/syntax/runtime failure, 2 = I/O error)
//! - stdout/stderr output
//! - JSON output format

use std::path::PathBuf;
use std::process::Command;

// ── Helpers ───────────────────────────────────────────────

fn turboswift_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_turboswift"))
}

fn fixture_valid(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(format!("../../tests/fixtures/valid/{}", name))
        .to_string_lossy()
        .into_owned()
}

fn fixture_invalid(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(format!("../../tests/fixtures/invalid/{}", name))
        .to_string_lossy()
        .into_owned()
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(turboswift_bin())
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute turboswift")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_cli(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = stdout_of(&output);
    assert!(stdout.contains("turboswift"), "should contain 'turboswift'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
}

#[test]
fn test_version_flag() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    assert!(stdout_of(&output).contains(env!("CARGO_PKG_VERSION")));
}

// ── Run ───────────────────────────────────────────────────

#[test]
fn test_run_hello() {
    let output = run_cli(&["run", &fixture_valid("hello.tsw")]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "Hello, TurboSwift\n42\n");
}

#[test]
fn test_run_window_program() {
    let output = run_cli(&["run", &fixture_valid("window.tsw")]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "<GRC object>\nshown\n");
}

#[test]
fn test_run_custom_entry_method() {
    let output = run_cli(&[
        "run",
        &fixture_valid("helper.tsw"),
        "--entry-method",
        "start",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "custom entry\n");
}

#[test]
fn test_run_entry_method_with_unbound_param() {
    let output = run_cli(&[
        "run",
        &fixture_valid("helper.tsw"),
        "--entry-contract",
        "Greeter",
        "--entry-method",
        "greet",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "null\n", "missing arguments bind to null");
}

#[test]
fn test_run_rejected_by_turbalance() {
    let output = run_cli(&["run", &fixture_invalid("unclosed-brace.tsw")]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output), "", "nothing should execute");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("[TURBALANCE] Line 1: Unclosed '{'"));
    assert!(stderr.contains("Fix errors before running."));
}

#[test]
fn test_run_import_without_semicolon() {
    let output = run_cli(&["run", &fixture_invalid("import-semicolon.tsw")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("[TURBALANCE] Line 2: Import statement must end with ';'"));
}

#[test]
fn test_run_syntax_error() {
    let output = run_cli(&["run", &fixture_invalid("syntax-error.tsw")]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Parsing error"), "stderr: {}", stderr);
    assert!(stderr.contains("Expected 'aka' at token 5, got 'grey'"));
}

#[test]
fn test_run_missing_app_contract() {
    let output = run_cli(&["run", &fixture_invalid("no-app.tsw")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Contract App not found"));
}

#[test]
fn test_run_undefined_reference_keeps_prior_output() {
    let output = run_cli(&["run", &fixture_invalid("undefined-reference.tsw")]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output), "before\n");
    assert!(stderr_of(&output).contains("Undefined reference 'ghost'"));
}

#[test]
fn test_run_unknown_statement_strict() {
    let output = run_cli(&["run", &fixture_invalid("unknown-statement.tsw")]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output), "", "strict mode compiles before running");
}

#[test]
fn test_run_unknown_statement_lenient() {
    let output = run_cli(&["run", &fixture_invalid("unknown-statement.tsw"), "--lenient"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "first\nsecond\n");
}

#[test]
fn test_run_missing_file() {
    let output = run_cli(&["run", "does-not-exist.tsw"]);
    assert_eq!(output.status.code(), Some(2), "I/O errors exit 2");
    assert!(stderr_of(&output).contains("cannot read"));
}

// ── Check ─────────────────────────────────────────────────

#[test]
fn test_check_clean_file() {
    let output = run_cli(&["check", &fixture_valid("window.tsw")]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("No syntax errors found."));
}

#[test]
fn test_check_quiet() {
    let output = run_cli(&["--quiet", "check", &fixture_valid("window.tsw")]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "");
}

#[test]
fn test_check_findings_exit_1() {
    let output = run_cli(&["check", &fixture_invalid("unclosed-brace.tsw")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Unclosed '{'"));
}

#[test]
fn test_check_json_output() {
    let output = run_cli(&["check", &fixture_invalid("import-semicolon.tsw"), "--json"]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("should be valid JSON");
    assert_eq!(json["clean"], false);
    assert_eq!(json["count"], 1);
    assert_eq!(json["findings"][0]["line"], 2);
    assert_eq!(json["findings"][0]["kind"], "missing_import_terminator");
}

#[test]
fn test_check_json_clean() {
    let output = run_cli(&["check", &fixture_valid("hello.tsw"), "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["clean"], true);
    assert_eq!(json["findings"], serde_json::json!([]));
}

// ── Tokens ────────────────────────────────────────────────

#[test]
fn test_tokens_plain() {
    let output = run_cli(&["tokens", &fixture_invalid("syntax-error.tsw")]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout_of(&output).lines().map(String::from).collect();
    assert_eq!(
        lines,
        vec!["contract", "App", "{", "import", "grey", "grey", ";", "}"]
    );
}

#[test]
fn test_tokens_json() {
    let output = run_cli(&["tokens", &fixture_valid("hello.tsw"), "--json"]);
    assert!(output.status.success());
    let tokens: Vec<String> = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert!(tokens.contains(&"\"Hello, TurboSwift\"".to_string()));
    assert!(tokens.contains(&"->".to_string()));
}

// ── Parse ─────────────────────────────────────────────────

#[test]
fn test_parse_outputs_contracts() {
    let output = run_cli(&["parse", &fixture_valid("helper.tsw")]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let contracts = &json["contracts"];
    assert!(contracts["App"]["methods"]["start"].is_object());
    assert_eq!(
        contracts["Greeter"]["methods"]["greet"]["params"],
        serde_json::json!(["name"])
    );
}

#[test]
fn test_parse_syntax_error() {
    let output = run_cli(&["parse", &fixture_invalid("syntax-error.tsw")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Parsing error"));
}

// ── Hash ──────────────────────────────────────────────────

#[test]
fn test_hash_is_stable() {
    let first = run_cli(&["hash", &fixture_valid("window.tsw")]);
    let second = run_cli(&["hash", &fixture_valid("window.tsw")]);
    assert!(first.status.success());
    let hash = stdout_of(&first).trim().to_string();
    assert_eq!(hash.len(), 64, "SHA-256 hex digest");
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(hash, stdout_of(&second).trim());
}

#[test]
fn test_hash_differs_between_programs() {
    let a = run_cli(&["hash", &fixture_valid("hello.tsw")]);
    let b = run_cli(&["hash", &fixture_valid("window.tsw")]);
    assert_ne!(stdout_of(&a), stdout_of(&b));
}

// ── Determinism ───────────────────────────────────────────

#[test]
fn test_run_output_deterministic() {
    let first = run_cli(&["run", &fixture_valid("window.tsw")]);
    for _ in 0..10 {
        let again = run_cli(&["run", &fixture_valid("window.tsw")]);
        assert_eq!(first.stdout, again.stdout);
        assert_eq!(first.status.code(), again.status.code());
    }
}
