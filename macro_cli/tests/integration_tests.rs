//! Integration tests for the mcalc binary.
//!
//! These tests verify end-to-end behavior including:
//! - Estimates from command-line profile input
//! - Profile persistence as the last-used input
//! - Weight log add/list/remove/chart/export
//! - Theme persistence

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI pointed at `dir` for data, with config and log level isolated
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mcalc"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%m/%d/%Y").to_string()
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("mcalc"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Macro & calorie calculator"));
}

#[test]
fn test_calc_renders_targets() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["calc", "--age", "25", "--sex", "male"])
        .args(["--weight", "70", "--height", "175", "--activity", "sedentary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2009 kcal/day"))
        .stdout(predicate::str::contains("Protein:       112 g/day"))
        .stdout(predicate::str::contains("Fats:          56 g/day"))
        .stdout(predicate::str::contains("2.45 L/day"))
        .stdout(predicate::str::contains("2.3 g/day"));
}

#[test]
fn test_calc_json_output() {
    let temp_dir = setup_test_dir();

    let output = cli(temp_dir.path())
        .args(["calc", "--json", "--age", "25", "--weight", "70"])
        .args(["--height", "175", "--activity", "active"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(json["energy_target"], 2887);
    assert_eq!(json["salt_grams"], 3.18);
    assert_eq!(json["water_liters"], 2.45);
}

#[test]
fn test_calc_without_profile_fails_with_notice() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("calc")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter valid numbers for age, weight, and height.",
        ));
}

#[test]
fn test_calc_rejects_non_numeric_input() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["calc", "--age", "30", "--weight", "heavy", "--height", "180"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("weight"));

    // Nothing was saved
    assert!(!temp_dir.path().join("data/profile.json").exists());
}

#[test]
fn test_calc_rejects_negative_height() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["calc", "--age", "30", "--weight", "80", "--height", "-180"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Height must be a positive number"));
}

#[test]
fn test_profile_persists_as_last_used_input() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["calc", "--age", "25", "--weight", "70", "--height", "175"])
        .assert()
        .success();

    assert!(temp_dir.path().join("data/profile.json").exists());

    cli(temp_dir.path())
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25 years"))
        .stdout(predicate::str::contains("70 kg"))
        .stdout(predicate::str::contains("Little or no exercise, desk job."));

    // Default command recomputes from the saved profile
    cli(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2009 kcal/day"));
}

#[test]
fn test_profile_set_partial_update() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["profile", "set", "--age", "40", "--sex", "female"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile saved"))
        .stdout(predicate::str::contains("Female"))
        .stdout(predicate::str::contains("Weight:    not set"));

    cli(temp_dir.path())
        .args(["profile", "set", "--activity", "veryActive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("40 years"))
        .stdout(predicate::str::contains("Very active"));
}

#[test]
fn test_profile_set_requires_a_field() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["profile", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_unknown_activity_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["profile", "set", "--activity", "couch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown activity level"));
}

#[test]
fn test_negative_carbs_flagged() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["calc", "--age", "100", "--sex", "female"])
        .args(["--weight", "50", "--height", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carbs:         -46 g/day"))
        .stdout(predicate::str::contains("carbs are negative"));
}

#[test]
fn test_log_add_and_list() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["log", "add", "80.4", "--notes", "  after breakfast  "])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Logged 80.4 kg on {}", today())));

    cli(temp_dir.path())
        .args(["log", "add", "80.1"])
        .assert()
        .success();

    let output = cli(temp_dir.path())
        .args(["log", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&output);

    // Newest first
    let newest = stdout.find("[0]").unwrap();
    let oldest = stdout.find("[1]").unwrap();
    assert!(newest < oldest);
    assert!(stdout.contains("Weight: 80.1 kg"));
    assert!(stdout.contains("Notes: after breakfast"));
}

#[test]
fn test_log_add_rejects_invalid_weight() {
    let temp_dir = setup_test_dir();

    for bad in ["", "abc", "0", "-5"] {
        cli(temp_dir.path())
            .args(["log", "add", bad])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Please enter a valid weight for the log.",
            ));
    }

    assert!(!temp_dir.path().join("data/weight_log.json").exists());
}

#[test]
fn test_log_add_then_remove_restores_file() {
    let temp_dir = setup_test_dir();
    let log_path = temp_dir.path().join("data/weight_log.json");

    cli(temp_dir.path()).args(["log", "add", "79"]).assert().success();
    let before = fs::read_to_string(&log_path).unwrap();

    cli(temp_dir.path()).args(["log", "add", "78.5"]).assert().success();
    cli(temp_dir.path())
        .args(["log", "rm", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 78.5 kg"));

    let after = fs::read_to_string(&log_path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_log_rm_out_of_range_is_silent() {
    let temp_dir = setup_test_dir();
    let log_path = temp_dir.path().join("data/weight_log.json");

    cli(temp_dir.path()).args(["log", "add", "79"]).assert().success();
    let before = fs::read_to_string(&log_path).unwrap();

    cli(temp_dir.path())
        .args(["log", "rm", "7"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert_eq!(before, fs::read_to_string(&log_path).unwrap());
}

#[test]
fn test_log_chart_needs_two_entries() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path()).args(["log", "add", "81"]).assert().success();
    cli(temp_dir.path())
        .args(["log", "chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("at least two log entries"));

    cli(temp_dir.path()).args(["log", "add", "80"]).assert().success();
    cli(temp_dir.path())
        .args(["log", "chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WEIGHT PROGRESS"))
        .stdout(predicate::str::contains("83.0"))
        .stdout(predicate::str::contains("78.0"))
        .stdout(predicate::str::contains("Change: -1.0 kg over 2 entries"));
}

#[test]
fn test_log_export_csv() {
    let temp_dir = setup_test_dir();
    let csv_path = temp_dir.path().join("export/weights.csv");

    cli(temp_dir.path()).args(["log", "add", "82"]).assert().success();
    cli(temp_dir.path())
        .args(["log", "add", "81.5", "--notes", "hot day"])
        .assert()
        .success();

    cli(temp_dir.path())
        .args(["log", "export"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 entries"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,weight_kg,notes");
    assert!(lines[1].ends_with(",82.0,"));
    assert!(lines[2].ends_with(",81.5,hot day"));
}

#[test]
fn test_theme_toggle_persists() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light"));

    cli(temp_dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to dark mode"));

    let flag = fs::read_to_string(temp_dir.path().join("data/dark_mode.json")).unwrap();
    assert_eq!(flag.trim(), "true");

    cli(temp_dir.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));

    cli(temp_dir.path())
        .args(["theme", "light"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to light mode"));
}

#[test]
fn test_date_format_from_config() {
    let temp_dir = setup_test_dir();
    let config_dir = temp_dir.path().join("config/macrocalc");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[display]\ndate_format = \"%Y-%m-%d\"\n",
    )
    .unwrap();

    let iso = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    cli(temp_dir.path())
        .args(["log", "add", "77.7"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("on {}", iso)));
}

#[test]
fn test_time_only_date_format_fails_cleanly() {
    let temp_dir = setup_test_dir();
    let config_dir = temp_dir.path().join("config/macrocalc");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[display]\ndate_format = \"%Y-%m-%d %H:%M\"\n",
    )
    .unwrap();

    cli(temp_dir.path())
        .args(["log", "add", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("✗"))
        .stderr(predicate::str::contains("cannot format a calendar date"))
        .stderr(predicate::str::contains("panicked").not());

    // Rejected before anything was written
    assert!(!temp_dir.path().join("data/weight_log.json").exists());
}
