//! End-to-end tests for the taskboard binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the user's config, environment and data
fn taskboard(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taskboard").unwrap();
    cmd.current_dir(home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("TASKBOARD_DATA_DIR", home.path().join("board"))
        .env_remove("TASKBOARD_SEED_DEMO_BOARD")
        .env_remove("TASKBOARD_JSON")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_show_seeds_demo_board_on_first_run() {
    let home = TempDir::new().unwrap();

    taskboard(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("To Do (C7)"))
        .stdout(predicate::str::contains("T3 Fix lighting in the room"));

    assert!(home.path().join("board").join("columns.json").exists());
    assert!(home.path().join("board").join("seeded.json").exists());
}

#[test]
fn test_seeding_can_be_disabled() {
    let home = TempDir::new().unwrap();

    taskboard(&home)
        .env("TASKBOARD_SEED_DEMO_BOARD", "false")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No columns"));
}

#[test]
fn test_add_and_drag_persist_between_runs() {
    let home = TempDir::new().unwrap();

    taskboard(&home)
        .args(["add-column", "Review"])
        .assert()
        .success()
        .stdout("Added column C8\n");

    taskboard(&home)
        .args(["drag", "T3", "C8"])
        .assert()
        .success()
        .stdout("Committed\n");

    let output = taskboard(&home)
        .args(["show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let board: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let moved = board["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == "T3")
        .unwrap();
    assert_eq!(moved["columnId"], "C8");
}

#[test]
fn test_delete_column_cascades() {
    let home = TempDir::new().unwrap();

    taskboard(&home)
        .args(["delete-column", "C5"])
        .assert()
        .success()
        .stdout("Deleted column C5\n");

    let tasks = fs::read_to_string(home.path().join("board").join("tasks.json")).unwrap();
    assert!(!tasks.contains("\"C5\""));
    assert!(!tasks.contains("College project"));
}

#[test]
fn test_delete_absent_is_not_an_error() {
    let home = TempDir::new().unwrap();

    taskboard(&home)
        .args(["delete-task", "T99"])
        .assert()
        .success()
        .stdout("No task T99\n");
}

#[test]
fn test_blank_title_fails() {
    let home = TempDir::new().unwrap();

    taskboard(&home)
        .args(["add-column", "   "])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("title cannot be empty"));
}

#[test]
fn test_add_task_to_missing_column_fails() {
    let home = TempDir::new().unwrap();

    taskboard(&home)
        .args(["add-task", "C404", "Lost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("column not found: C404"));
}

#[test]
fn test_navigate_prints_focused_entity() {
    let home = TempDir::new().unwrap();

    taskboard(&home)
        .args(["navigate", "right", "right", "down", "down"])
        .assert()
        .success()
        .stdout("task T4: Prepare for exam\n");
}

#[test]
fn test_replay_from_file() {
    let home = TempDir::new().unwrap();
    let stream = home.path().join("gestures.json");
    fs::write(
        &stream,
        r#"[
            {"phase": "start", "active": {"kind": "task", "id": "T4"}},
            {"phase": "over", "active": {"kind": "task", "id": "T4"}, "over": {"kind": "task", "id": "T3"}},
            {"phase": "end", "active": {"kind": "task", "id": "T4"}, "over": null}
        ]"#,
    )
    .unwrap();

    taskboard(&home)
        .arg("replay")
        .arg(&stream)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dropped outside any target"))
        .stdout(predicate::str::contains("Replayed 3 gestures"));

    let tasks = fs::read_to_string(home.path().join("board").join("tasks.json")).unwrap();
    let tasks: serde_json::Value = serde_json::from_str(&tasks).unwrap();
    let t4 = tasks
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == "T4")
        .unwrap();
    assert_eq!(t4["columnId"], "C7");
}

#[test]
fn test_project_config_file_is_read() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("taskboard.toml"), "json = true\n").unwrap();

    taskboard(&home)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}
