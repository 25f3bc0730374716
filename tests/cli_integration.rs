//! Integration tests for the `todo` CLI.
//!
//! Each test creates a temp data directory, runs `todo` as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Get the path to the built `todo` binary.
fn todo_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("todo");
    path
}

/// Run `todo` with `args` in `dir`.
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(todo_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run todo")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn tasks_file(dir: &Path) -> String {
    fs::read_to_string(dir.join("tasks.dat")).unwrap()
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[test]
fn list_empty_directory() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["list"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "");
    assert!(!tmp.path().join("tasks.dat").exists());
}

#[test]
fn add_toggle_list() {
    let tmp = TempDir::new().unwrap();
    assert!(run(tmp.path(), &["add", "Buy milk"]).status.success());
    assert!(run(tmp.path(), &["add", "Walk dog"]).status.success());
    assert_eq!(tasks_file(tmp.path()), "Buy milk\u{6}False\nWalk dog\u{6}False");

    let out = run(tmp.path(), &["toggle", "1"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "done: [x] Walk dog\n");

    let out = run(tmp.path(), &["ls"]);
    assert_eq!(stdout(&out), "  0 [ ] Buy milk\n  1 [x] Walk dog\n");
}

#[test]
fn add_prints_new_index() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "first"]);
    let out = run(tmp.path(), &["add", "second", "--done"]);
    assert_eq!(stdout(&out), "  1 [x] second\n");
}

#[test]
fn add_without_name_uses_default() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["add"]);
    assert!(out.status.success());
    assert_eq!(tasks_file(tmp.path()), "Task Name\u{6}False");
}

#[test]
fn add_warns_on_newline_in_name() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["add", "two\nlines"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("warning:"));
}

#[test]
fn toggle_out_of_range_fails() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "only"]);
    let out = run(tmp.path(), &["done", "3"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("error: no task at index 3 (list has 1 task)"));
    assert_eq!(tasks_file(tmp.path()), "only\u{6}False");
}

#[test]
fn rm_shifts_later_tasks() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.dat"), "A\u{6}True\nB\u{6}False\nC\u{6}True").unwrap();

    let out = run(tmp.path(), &["rm", "1"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "removed: [ ] B\n");
    assert_eq!(tasks_file(tmp.path()), "A\u{6}True\nC\u{6}True");

    let out = run(tmp.path(), &["list"]);
    assert_eq!(stdout(&out), "  0 [x] A\n  1 [x] C\n");
}

#[test]
fn rm_out_of_range_is_silent() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.dat"), "A\u{6}True").unwrap();
    let out = run(tmp.path(), &["rm", "9"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "");
    assert_eq!(stderr(&out), "");
    assert_eq!(tasks_file(tmp.path()), "A\u{6}True");
}

#[test]
fn rm_is_logged_for_recovery() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.dat"), "Pay rent\u{6}True").unwrap();
    run(tmp.path(), &["rm", "0"]);

    let out = run(tmp.path(), &["recovery"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("delete: task 0 removed"));
    assert!(text.contains("Pay rent\\x06True"));
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[test]
fn list_json() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.dat"), "A\u{6}True\nB\u{6}False").unwrap();
    let out = run(tmp.path(), &["list", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "selection": -1,
            "tasks": [
                {"index": 0, "name": "A", "done": true},
                {"index": 1, "name": "B", "done": false},
            ]
        })
    );
}

#[test]
fn toggle_json() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "A"]);
    let out = run(tmp.path(), &["--json", "toggle", "0"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json, serde_json::json!({"index": 0, "name": "A", "done": true}));
}

// ---------------------------------------------------------------------------
// Done-flag compatibility
// ---------------------------------------------------------------------------

#[test]
fn last_done_task_survives_restart() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.dat"), "A\u{6}False\nB\u{6}True").unwrap();
    let out = run(tmp.path(), &["list"]);
    assert_eq!(stdout(&out), "  0 [ ] A\n  1 [x] B\n");
}

#[test]
fn legacy_flag_reproduces_old_reading() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.dat"), "A\u{6}False\nB\u{6}True").unwrap();
    let out = run(tmp.path(), &["list", "--legacy-done-flag"]);
    assert_eq!(stdout(&out), "  0 [ ] A\n  1 [ ] B\n");
}

#[test]
fn legacy_flag_from_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("todo.toml"), "[store]\nlegacy_done_flag = true\n").unwrap();
    fs::write(tmp.path().join("tasks.dat"), "A\u{6}True").unwrap();
    let out = run(tmp.path(), &["list"]);
    assert_eq!(stdout(&out), "  0 [ ] A\n");
}

// ---------------------------------------------------------------------------
// Data directory and config
// ---------------------------------------------------------------------------

#[test]
fn dir_flag_targets_other_directory() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir(&data).unwrap();
    let out = run(tmp.path(), &["-C", data.to_str().unwrap(), "add", "elsewhere"]);
    assert!(out.status.success());
    assert_eq!(tasks_file(&data), "elsewhere\u{6}False");
    assert!(!tmp.path().join("tasks.dat").exists());
}

#[test]
fn file_flag_and_config_choose_store() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["--file", "other.dat", "add", "x"]);
    assert_eq!(
        fs::read_to_string(tmp.path().join("other.dat")).unwrap(),
        "x\u{6}False"
    );

    fs::write(tmp.path().join("todo.toml"), "[store]\nfile = \"other.dat\"\n").unwrap();
    let out = run(tmp.path(), &["list"]);
    assert_eq!(stdout(&out), "  0 [ ] x\n");
}

#[test]
fn init_writes_template_once() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["init"]);
    assert!(out.status.success());
    assert!(tmp.path().join("todo.toml").exists());

    let out = run(tmp.path(), &["init"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("already exists"));

    assert!(run(tmp.path(), &["init", "--force"]).status.success());
}

#[test]
fn init_replaces_broken_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("todo.toml"), "not [valid toml").unwrap();

    let out = run(tmp.path(), &["list"]);
    assert!(!out.status.success());
    assert!(stderr(&out).starts_with("error:"));

    assert!(run(tmp.path(), &["init", "--force"]).status.success());
    assert!(run(tmp.path(), &["list"]).status.success());
}

#[test]
fn info_uses_configured_text() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["info"]);
    assert!(stdout(&out).starts_with("todo v"));

    fs::write(tmp.path().join("todo.toml"), "[ui]\ninfo_text = \"placeholder\"\n").unwrap();
    let out = run(tmp.path(), &["info"]);
    assert_eq!(stdout(&out), "placeholder\n");
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[test]
fn malformed_records_are_logged() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.dat"), "good\u{6}True\nbroken line").unwrap();

    let out = run(tmp.path(), &["list"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "  0 [x] good\n");
    assert!(stderr(&out).contains("skipped 1 malformed record"));

    let out = run(tmp.path(), &["recovery", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["category"], "parser");
    assert!(entries[0]["body"].as_str().unwrap().contains("broken line"));
}

#[test]
fn recovery_prune_all() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.dat"), "A\u{6}True\nB\u{6}True").unwrap();
    run(tmp.path(), &["rm", "0"]);
    run(tmp.path(), &["rm", "0"]);

    let out = run(tmp.path(), &["recovery", "prune", "--all"]);
    assert_eq!(stdout(&out), "pruned 2 entries\n");

    let out = run(tmp.path(), &["recovery"]);
    assert_eq!(stdout(&out), "recovery log is empty\n");
}

#[test]
fn recovery_path() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["recovery", "path"]);
    assert!(stdout(&out).trim_end().ends_with(".todo-recovery.log"));
}

#[test]
fn recovery_prune_rejects_bad_date() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["recovery", "prune", "--before", "soon"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("invalid timestamp"));
}
