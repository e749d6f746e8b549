//! CLI end-to-end tests
//!
//! Drive the `herdview` binary against feed files in a temp directory.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn feed(day: i64, cow_health: u32, extra_pig: bool) -> Value {
    let mut animals = vec![
        json!({"id": "1", "subType": "COW_ANGUS", "age": 30, "health": cow_health,
               "gender": "female", "location": "North"}),
        json!({"id": "2", "subType": "COW_ANGUS", "age": 20, "health": 90,
               "gender": "female", "location": "North"}),
    ];
    if extra_pig {
        animals.push(json!({"id": "3", "subType": "PIG_LANDRACE", "age": 8,
                            "health": 95, "location": "Sty"}));
    }
    json!({
        "animals": animals,
        "gameTime": {"currentDay": day, "dayTime": 600},
        "farmInfo": {"farmId": 1, "name": "Home"}
    })
}

fn write_feed(dir: &Path, name: &str, doc: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, doc.to_string()).unwrap();
    path
}

fn herdview(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_herdview"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_ingest_then_report() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_feed(dir, "a.json", &feed(1, 80, false));
    write_feed(dir, "b.json", &feed(2, 50, true));

    let out = herdview(dir, &["ingest", "--feed", "a.json", "--out", "old.json"]);
    assert!(out.status.success());
    let out = herdview(dir, &["ingest", "--feed", "b.json", "--out", "new.json"]);
    assert!(out.status.success());

    let report = stdout_json(&herdview(
        dir,
        &["report", "--old", "old.json", "--new", "new.json"],
    ));
    assert_eq!(report["classification"], "changed");
    assert_eq!(report["livestock"]["added"][0]["id"], "3");
    assert_eq!(report["livestock"]["updated"][0]["id"], "1");
    assert_eq!(
        report["livestock"]["updated"][0]["changes"]["health"],
        json!({"old": 80, "new": 50})
    );
    assert_eq!(report["gameTime"]["changed"], true);
}

#[test]
fn test_report_markdown() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_feed(dir, "a.json", &feed(1, 80, false));
    herdview(dir, &["ingest", "--feed", "a.json", "--out", "s.json"]);

    let out = herdview(
        dir,
        &["report", "--old", "s.json", "--new", "s.json", "--format", "markdown"],
    );
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("## Herd Changes"));
    assert!(text.contains("No Changes"));
}

#[test]
fn test_update_cycle_with_state_slot() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_feed(dir, "a.json", &feed(1, 80, false));
    write_feed(dir, "b.json", &feed(1, 80, true));

    let out = herdview(dir, &["update", "--feed", "a.json", "--state", "slot.json"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Baseline"));
    assert!(dir.join("slot.json").exists());

    let report = stdout_json(&herdview(
        dir,
        &["update", "--feed", "b.json", "--state", "slot.json"],
    ));
    assert_eq!(report["livestock"]["added"].as_array().unwrap().len(), 1);

    // Same feed again: nothing changed since the slot advanced
    let report = stdout_json(&herdview(
        dir,
        &["update", "--feed", "b.json", "--state", "slot.json"],
    ));
    assert_eq!(report["classification"], "no_changes");

    let out = herdview(dir, &["reset", "--state", "slot.json"]);
    assert!(out.status.success());
    assert!(!dir.join("slot.json").exists());
}

#[test]
fn test_state_path_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_feed(dir, "a.json", &feed(1, 80, false));
    fs::write(dir.join("herdview.yaml"), "state_path: state/last.json\n").unwrap();

    let out = herdview(
        dir,
        &["--config", "herdview.yaml", "update", "--feed", "a.json"],
    );
    assert!(out.status.success());
    assert!(dir.join("state").join("last.json").exists());
}

#[test]
fn test_warnings_and_value() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_feed(dir, "a.json", &feed(1, 80, true));
    fs::write(
        dir.join("pastures.json"),
        r#"[{"id": "North", "name": "North", "capacity": 2}]"#,
    )
    .unwrap();
    herdview(
        dir,
        &["ingest", "--feed", "a.json", "--out", "s.json", "--pastures", "pastures.json"],
    );

    let warnings = stdout_json(&herdview(dir, &["warnings", "--snapshot", "s.json"]));
    let north = warnings["pastures"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == "North")
        .unwrap()
        .clone();
    assert_eq!(north["warnings"][0]["type"], "capacity");
    assert_eq!(north["warnings"][0]["severity"], "danger");

    let herd = stdout_json(&herdview(dir, &["value", "--snapshot", "s.json"]));
    assert_eq!(herd["animalCount"], 3);
    assert!(herd["totalValue"].as_i64().unwrap() > 0);

    let one = stdout_json(&herdview(
        dir,
        &["value", "--snapshot", "s.json", "--animal", "3"],
    ));
    assert_eq!(one["id"], "3");
    assert!(one["breakdown"]["baseValue"].as_f64().unwrap() > 0.0);

    let out = herdview(dir, &["value", "--snapshot", "s.json", "--animal", "ghost"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ERR_INVALID_INPUT"), "stderr: {stderr}");
    assert!(stderr.contains("animal_id: ghost"), "stderr: {stderr}");
}

#[test]
fn test_errors_exit_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("bad.json"), "{\"weather\": {}}").unwrap();

    let out = herdview(dir, &["ingest", "--feed", "bad.json", "--out", "s.json"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));

    let out = herdview(dir, &["value", "--snapshot", "missing.json"]);
    assert!(!out.status.success());
}
