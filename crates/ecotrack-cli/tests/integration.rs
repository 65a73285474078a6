#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ecotrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ecotrack").unwrap();
    cmd.current_dir(dir.path())
        .env("ECOTRACK_ROOT", dir.path())
        .env_remove("ECOTRACK_DATA_FILE");
    cmd
}

fn add_recycling(dir: &TempDir) {
    ecotrack(dir)
        .args([
            "add",
            "--action",
            "Recycling",
            "--date",
            "2025-01-08",
            "--points",
            "25",
        ])
        .assert()
        .success();
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// ecotrack add / list / show
// ---------------------------------------------------------------------------

#[test]
fn list_on_fresh_project_is_empty() {
    let dir = TempDir::new().unwrap();
    ecotrack(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No actions recorded."));

    ecotrack(&dir)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn add_writes_data_file() {
    let dir = TempDir::new().unwrap();
    ecotrack(&dir)
        .args([
            "add",
            "--action",
            "Recycling",
            "--date",
            "2025-01-08",
            "--points",
            "25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added action [1]"));

    let data = read_json(&dir.path().join("actions.json"));
    assert_eq!(
        data,
        serde_json::json!([{"id": 1, "action": "Recycling", "date": "2025-01-08", "points": 25}])
    );
}

#[test]
fn list_shows_table() {
    let dir = TempDir::new().unwrap();
    add_recycling(&dir);
    ecotrack(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ACTION"))
        .stdout(predicate::str::contains("Recycling"))
        .stdout(predicate::str::contains("2025-01-08"));
}

#[test]
fn show_json_outputs_record() {
    let dir = TempDir::new().unwrap();
    add_recycling(&dir);
    let output = ecotrack(&dir)
        .args(["show", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["points"], 25);
}

#[test]
fn show_missing_fails() {
    let dir = TempDir::new().unwrap();
    ecotrack(&dir)
        .args(["show", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("action not found: 4"));
}

#[test]
fn add_with_blank_action_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    ecotrack(&dir)
        .args(["add", "--action", " ", "--date", "2025-01-08", "--points", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("action: This field may not be blank."));
    assert!(!dir.path().join("actions.json").exists());
}

#[test]
fn add_accepts_negative_points() {
    let dir = TempDir::new().unwrap();
    ecotrack(&dir)
        .args(["add", "--action", "Flight", "--date", "2025-02-01", "--points", "-40"])
        .assert()
        .success();
    let data = read_json(&dir.path().join("actions.json"));
    assert_eq!(data[0]["points"], -40);
}

// ---------------------------------------------------------------------------
// ecotrack update / remove
// ---------------------------------------------------------------------------

#[test]
fn update_points_keeps_other_fields() {
    let dir = TempDir::new().unwrap();
    add_recycling(&dir);
    ecotrack(&dir)
        .args(["update", "1", "--points", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20 points"));

    let data = read_json(&dir.path().join("actions.json"));
    assert_eq!(
        data[0],
        serde_json::json!({"id": 1, "action": "Recycling", "date": "2025-01-08", "points": 20})
    );
}

#[test]
fn update_without_fields_fails() {
    let dir = TempDir::new().unwrap();
    add_recycling(&dir);
    ecotrack(&dir)
        .args(["update", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));
}

#[test]
fn remove_then_list_is_empty() {
    let dir = TempDir::new().unwrap();
    add_recycling(&dir);
    ecotrack(&dir)
        .args(["remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed action [1]"));

    assert_eq!(read_json(&dir.path().join("actions.json")), serde_json::json!([]));
}

#[test]
fn remove_missing_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    add_recycling(&dir);
    let path = dir.path().join("actions.json");
    let before = std::fs::read(&path).unwrap();

    ecotrack(&dir).args(["remove", "2"]).assert().failure();
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn data_file_flag_overrides_default() {
    let dir = TempDir::new().unwrap();
    ecotrack(&dir)
        .args([
            "--data-file",
            "store/log.json",
            "add",
            "--action",
            "Bike",
            "--date",
            "2025-01-09",
            "--points",
            "15",
        ])
        .assert()
        .success();
    assert!(dir.path().join("store/log.json").exists());
    assert!(!dir.path().join("actions.json").exists());
}

#[test]
fn config_file_sets_data_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("ecotrack.yaml"), "data_file: data/actions.json\n").unwrap();
    add_recycling(&dir);
    assert!(dir.path().join("data/actions.json").exists());
}

#[test]
fn corrupt_data_file_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("actions.json"), "not json").unwrap();
    ecotrack(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is corrupt"));
}
