//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_slotfill"))
        .args(args)
        .env("SLOTFILL_DATA_DIR", data_dir)
        .env_remove("SLOTFILL_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

#[test]
fn test_task_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["task", "add", "Write report", "--minutes", "60", "--must", "--id", "report"]);
    assert!(out.contains("Task created: report"));

    let out = run_ok(dir.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(tasks[0]["id"], "report");
    assert_eq!(tasks[0]["kind"], "must");
    assert_eq!(tasks[0]["duration_minutes"], 60);
}

#[test]
fn test_task_rejects_non_positive_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["task", "add", "Nothing", "--minutes", "0", "--id", "zero"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("zero"));
}

#[test]
fn test_task_rejects_zero_value() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["task", "add", "Idle", "--minutes", "30", "--value", "0"]);
    assert_ne!(code, 0);
    let out = run_ok(dir.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(tasks.as_array().map_or(true, |t| t.is_empty()));
}

#[test]
fn test_commitment_add_remove() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["commitment", "add", "Lunch", "--start", "12:00", "--end", "13:00", "--id", "lunch"]);
    let out = run_ok(dir.path(), &["commitment", "list"]);
    assert!(out.contains("Lunch"));

    run_ok(dir.path(), &["commitment", "remove", "lunch"]);
    let (code, _, _) = run_cli(dir.path(), &["commitment", "remove", "lunch"]);
    assert_ne!(code, 0);
}

#[test]
fn test_commitment_rejects_bad_time() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["commitment", "add", "Gym", "--start", "7pm", "--end", "20:00"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("7pm"));
}

#[test]
fn test_schedule_run_json() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["commitment", "add", "Standup", "--start", "09:00", "--end", "09:30", "--id", "standup"]);
    run_ok(dir.path(), &["commitment", "add", "Lunch", "--start", "12:00", "--end", "13:00", "--id", "lunch"]);
    run_ok(dir.path(), &["task", "add", "Deep work", "--minutes", "60", "--must", "--id", "deep"]);
    run_ok(dir.path(), &["task", "add", "Mail", "--minutes", "30", "--value", "2", "--id", "mail"]);
    run_ok(dir.path(), &["task", "add", "Reading", "--minutes", "45", "--value", "5", "--id", "read"]);

    let out = run_ok(dir.path(), &["schedule", "run", "--from", "2026-10-16", "--days", "1", "--json"]);
    let allocation: serde_json::Value = serde_json::from_str(&out).unwrap();
    let placed: Vec<(String, i64)> = allocation["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["type"] == "task")
        .map(|i| (i["id"].as_str().unwrap().to_string(), i["start"].as_i64().unwrap()))
        .collect();
    assert_eq!(
        placed,
        vec![("deep".into(), 480), ("read".into(), 570), ("mail".into(), 615)]
    );
    assert_eq!(allocation["unplaced"].as_array().unwrap().len(), 0);
}

#[test]
fn test_schedule_free_text() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["commitment", "add", "Lunch", "--start", "12:00", "--end", "13:00"]);
    let out = run_ok(dir.path(), &["schedule", "free", "--from", "2026-10-16", "--days", "1"]);
    assert!(out.contains("2026-10-16"));
    assert!(out.contains("08:00–12:00"));
    assert!(out.contains("13:00–20:00"));
}

#[test]
fn test_schedule_zero_days_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["schedule", "run", "--days", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("at least one day"));
}

#[test]
fn test_schedule_reads_plan_file() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("week.json");
    std::fs::write(
        &plan,
        r#"{"commitments":[],"tasks":[{"id":"t","title":"T","duration_minutes":30}]}"#,
    )
    .unwrap();
    let out = run_ok(
        dir.path(),
        &["schedule", "run", "--from", "2026-10-16", "--days", "1", "--overnight", "--plan", plan.to_str().unwrap()],
    );
    assert!(out.contains("00:00–00:30"));
}

#[test]
fn test_config_set_get() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["config", "set", "planner.day_start", "07:00"]);
    let out = run_ok(dir.path(), &["config", "get", "planner.day_start"]);
    assert_eq!(out.trim(), "07:00");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "planner.unknown", "1"]);
    assert_ne!(code, 0);

    run_ok(dir.path(), &["config", "reset"]);
    let out = run_ok(dir.path(), &["config", "get", "planner.day_start"]);
    assert_eq!(out.trim(), "08:00");
}
