//! CLI integration tests
//!
//! Runs the binary against workbooks written by the shared fixtures.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn forge() -> Command {
    let mut cmd = Command::cargo_bin("schedule-forge").unwrap();
    cmd.env_remove("SCHEDULE_FORGE_CONFIG").env_remove("RUST_LOG");
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    forge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("schedule-forge"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    forge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("schedule-forge"));
}

#[test]
fn test_timetable_help() {
    forge()
        .args(["timetable", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("section tag"));
}

#[test]
fn test_course_and_code_conflict() {
    forge()
        .args(["datesheet", "finals.xlsx", "-c", "CS101 - Intro to CS", "--code", "CS101"])
        .assert()
        .failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// DATESHEET COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_datesheet_list() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("finals.xlsx");
    common::write_datesheet(&path);

    forge()
        .arg("datesheet")
        .arg(&path)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("CS101 - Intro to CS"))
        .stdout(predicate::str::contains("SS150 - Pakistan Studies"));
}

#[test]
fn test_datesheet_course_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("finals.xlsx");
    common::write_datesheet(&path);

    forge()
        .arg("datesheet")
        .arg(&path)
        .args(["-c", "MT104 - Linear Algebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("16 Dec 2024"))
        .stdout(predicate::str::contains("Linear Algebra"))
        .stdout(predicate::str::contains("Intro to CS").not());
}

#[test]
fn test_datesheet_code_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("finals.xlsx");
    common::write_datesheet(&path);

    let output = forge()
        .arg("datesheet")
        .arg(&path)
        .args(["--code", "EE201", "--json", "--title", "Finals"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["title"], "Finals");
    assert_eq!(json["semester"], "BS-CS");
    assert_eq!(json["rows"].as_array().unwrap().len(), 1);
    assert_eq!(json["rows"][0]["Code"], "EE201");
    assert_eq!(json["rows"][0]["Time"], "02:00PM-05:00PM");
}

#[test]
fn test_datesheet_rejects_timetable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spring.xlsx");
    common::write_timetable(&path);

    forge()
        .arg("datesheet")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match the expected layout"));
}

// ═══════════════════════════════════════════════════════════════════════════
// TIMETABLE COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_timetable_course_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spring.xlsx");
    common::write_timetable(&path);

    forge()
        .arg("timetable")
        .arg(&path)
        .args(["-c", "OOP (BCS 2A)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("08:00 AM - 09:20 AM"))
        .stdout(predicate::str::contains("Wednesday"))
        .stdout(predicate::str::contains("(BCS 2A)").not());
}

#[test]
fn test_timetable_json_separators() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spring.xlsx");
    common::write_timetable(&path);

    let output = forge()
        .arg("timetable")
        .arg(&path)
        .args(["-c", "OOP (BCS 2A)", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["Course"], "OOP");
    assert_eq!(rows[1]["Day"], "");
    assert_eq!(json["batches"][1], "BCS-2B");
}

#[test]
fn test_timetable_rejects_unmerged_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("holiday.xlsx");
    common::write_unmerged_timetable(&path);

    forge()
        .arg("timetable")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match the expected layout"));
}

#[test]
fn test_timetable_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spring.xlsx");
    common::write_timetable(&path);
    let config = temp_dir.path().join("layout.yaml");
    std::fs::write(&config, "timetable:\n  lecture_minutes: 120\n").unwrap();

    forge()
        .arg("--config")
        .arg(&config)
        .arg("timetable")
        .arg(&path)
        .args(["-c", "Calculus (BCS 2A)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10:00 AM - 12:00 PM"));
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT AND CONFIG COMMANDS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_timetable() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("spring.xlsx");
    let output = temp_dir.path().join("mine.xlsx");
    common::write_timetable(&input);

    forge()
        .arg("export")
        .arg(&input)
        .arg(&output)
        .args(["--kind", "timetable", "-c", "OOP (BCS 2B)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rows written"));

    assert!(output.exists());
}

#[test]
fn test_export_wrong_kind_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("finals.xlsx");
    let output = temp_dir.path().join("out.xlsx");
    common::write_datesheet(&input);

    forge()
        .arg("export")
        .arg(&input)
        .arg(&output)
        .args(["--kind", "timetable"])
        .assert()
        .failure();

    assert!(!output.exists());
}

#[test]
fn test_config_prints_defaults() {
    forge()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("lecture_minutes: 80"))
        .stdout(predicate::str::contains("header_row: 2"));
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("layout.yaml");
    std::fs::write(&config, "timetable:\n  lecture_cells: 0\n").unwrap();

    forge()
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .failure();
}
