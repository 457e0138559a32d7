//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `ATTUNE_DATA_DIR` pointed at `data_dir`.
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "attune-cli", "--"])
        .args(args)
        .env("ATTUNE_DATA_DIR", data_dir)
        .env_remove("ATTUNE_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn list_tasks(data_dir: &Path) -> Vec<serde_json::Value> {
    let (code, stdout, stderr) = run_cli(data_dir, &["task", "list", "--json"]);
    assert_eq!(code, 0, "task list failed: {stderr}");
    serde_json::from_str::<Vec<serde_json::Value>>(&stdout).expect("task list emits a JSON array")
}

#[test]
fn test_task_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["task", "add", "Linear algebra", "--minutes", "45", "--difficulty", "5"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Task created:"));

    let tasks = list_tasks(dir.path());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Linear algebra");
    assert_eq!(tasks[0]["estimated_minutes"], 45);
    assert_eq!(tasks[0]["difficulty"], 5);
    assert_eq!(tasks[0]["priority"], 2);
    assert_eq!(tasks[0]["discipline"], "general");
}

#[test]
fn test_task_add_rejects_out_of_range_difficulty() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["task", "add", "Too hard", "--difficulty", "9"]);
    assert_ne!(code, 0);
    assert!(list_tasks(dir.path()).is_empty());
}

#[test]
fn test_task_toggle_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["task", "add", "Flashcards"]);
    let id = list_tasks(dir.path())[0]["id"].as_str().unwrap().to_string();

    let (code, stdout, _) = run_cli(dir.path(), &["task", "toggle", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("completed"));
    assert_eq!(list_tasks(dir.path())[0]["completed"], true);

    let (code, _, _) = run_cli(dir.path(), &["task", "remove", &id]);
    assert_eq!(code, 0);
    assert!(list_tasks(dir.path()).is_empty());

    let (code, _, stderr) = run_cli(dir.path(), &["task", "remove", &id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_schedule_generate_and_complete() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["task", "add", "Proofs", "--difficulty", "5", "--priority", "5"]);
    run_cli(dir.path(), &["task", "add", "Vocabulary", "--difficulty", "1", "--minutes", "10"]);

    let (code, stdout, stderr) = run_cli(dir.path(), &["schedule", "generate", "--json"]);
    assert_eq!(code, 0, "schedule generate failed: {stderr}");
    let timeline: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0]["task"]["title"], "Proofs");

    let (code, stdout, _) = run_cli(dir.path(), &["schedule", "current"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Proofs"));

    let (code, stdout, _) = run_cli(dir.path(), &["schedule", "complete", "45"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Completed: Proofs"));
    assert!(stdout.contains("Take a break"));
    assert!(stdout.contains("Next: Vocabulary"));

    let (code, stdout, _) = run_cli(dir.path(), &["schedule", "break"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Proofs"));
}

#[test]
fn test_schedule_complete_without_timeline_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["schedule", "complete", "20"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "attention.morning_peak"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "85");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "breaks.max_break_duration", "20"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "breaks.max_break_duration"]);
    assert_eq!(stdout.trim(), "20");
    assert!(dir.path().join("config.toml").exists());

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "attention.afternoon_dip", "0"]);
    assert_ne!(code, 0);

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "no.such_key"]);
    assert_ne!(code, 0);
}

#[test]
fn test_attention_at() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["attention", "at", "14:30"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("afternoon dip"));
    assert!(stdout.contains("60%"));

    let (code, _, _) = run_cli(dir.path(), &["attention", "at", "25:00"]);
    assert_ne!(code, 0);
}

#[test]
fn test_attention_chart() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["attention", "chart"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Attention Curve"));
}

#[test]
fn test_config_set_with_corrupt_state_keeps_settings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("state.json"), "{ not json").unwrap();

    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "breaks.max_break_duration", "20"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "breaks.max_break_duration"]);
    assert_eq!(stdout.trim(), "15");
}
