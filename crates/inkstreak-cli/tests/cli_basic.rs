//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `home` as the data directory.
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_inkstreak"))
        .args(args)
        .env("INKSTREAK_HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command {:?} failed: {}", args, stderr);
    stdout
}

fn streak_json(home: &Path, today: &str) -> serde_json::Value {
    let out = run_cli_success(home, &["streak", "--json", "--today", today]);
    serde_json::from_str(&out).expect("streak --json should print JSON")
}

#[test]
fn test_streak_on_empty_history() {
    let home = tempfile::tempdir().unwrap();
    let report = streak_json(home.path(), "2024-06-05");
    assert_eq!(report["streakLength"], 0);
    assert_eq!(report["graceBroken"], true);
    assert_eq!(report["lastCompleteDate"], serde_json::Value::Null);
    assert_eq!(report["today"], "2024-06-05");
}

#[test]
fn test_day_create_and_streak() {
    let home = tempfile::tempdir().unwrap();
    for date in ["2024-01-01", "2024-01-02", "2023-12-31"] {
        run_cli_success(home.path(), &["day", "create", date, "--written", "--published"]);
    }
    run_cli_success(home.path(), &["day", "set", "2024-01-04", "--written", "true"]);

    let report = streak_json(home.path(), "2024-01-04");
    assert_eq!(report["streakLength"], 3);
    assert_eq!(report["daysUsedInGrace"], 2);
    assert_eq!(report["isInGrace"], true);
    assert_eq!(report["lastCompleteDate"], "2024-01-02");
    assert_eq!(report["lastActivityDate"], "2024-01-04");
}

#[test]
fn test_streak_text_output() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["day", "create", "2024-06-05", "--written", "--published"]);
    let out = run_cli_success(home.path(), &["streak", "--today", "2024-06-05"]);
    assert!(out.contains("Streak:         1 day (healthy)"), "{out}");
    assert!(out.contains("Longest streak: 1 day"), "{out}");
}

#[test]
fn test_day_set_merges_flags() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["day", "set", "2024-06-05", "--written", "true"]);
    run_cli_success(home.path(), &["day", "set", "2024-06-05", "--published", "true"]);

    let out = run_cli_success(home.path(), &["day", "show", "2024-06-05"]);
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["written"], true);
    assert_eq!(status["published"], true);
}

#[test]
fn test_day_delete_and_clear() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["day", "create", "2024-06-04", "--written"]);
    run_cli_success(home.path(), &["day", "create", "2024-06-05", "--published"]);

    let out = run_cli_success(home.path(), &["day", "delete", "2024-06-04"]);
    assert!(out.contains("deleted 2024-06-04"));
    let list: serde_json::Value =
        serde_json::from_str(&run_cli_success(home.path(), &["day", "list"])).unwrap();
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    run_cli_success(home.path(), &["day", "clear"]);
    assert!(!home.path().join("dayStatuses.json").exists());
}

#[test]
fn test_invalid_dates_fail() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["streak", "--today", "2024-02-30"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "{stderr}");

    let (_, _, code) = run_cli(home.path(), &["day", "create", "2024-13-01", "--written"]);
    assert_eq!(code, 1);
}

#[test]
fn test_corrupt_storage_is_treated_as_empty() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("dayStatuses.json"),
        r#"{"version": 99, "data": {}}"#,
    )
    .unwrap();

    let report = streak_json(home.path(), "2024-06-05");
    assert_eq!(report["streakLength"], 0);
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(home.path(), &["config", "get", "log.filter"]).trim(),
        "warn"
    );
    run_cli_success(home.path(), &["config", "set", "report.pretty_json", "false"]);
    assert_eq!(
        run_cli_success(home.path(), &["config", "get", "report.pretty_json"]).trim(),
        "false"
    );

    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope.nothing"]);
    assert_eq!(code, 1);
}
