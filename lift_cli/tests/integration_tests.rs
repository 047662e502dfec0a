//! Integration tests for the liftlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Record logging, listing, editing and deleting
//! - Delete confirmation
//! - Maxes and progress reports
//! - CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI command isolated from the user's config and data
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liftlog"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn add_workout(dir: &Path, name: &str, reps: &str, weight: &str, date: &str) {
    cli(dir)
        .args(["workout", "add", "--name", name, "--reps", reps, "--sets", "3"])
        .args(["--weight", weight, "--date", date])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout logged"));
}

fn add_weight(dir: &Path, weight: &str, date: &str) {
    cli(dir)
        .args(["weight", "add", weight, "--date", date])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bodyweight logged"));
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personal workout, meal and bodyweight tracker",
        ));
}

#[test]
fn test_workout_add_creates_database() {
    let temp_dir = setup_test_dir();
    add_workout(temp_dir.path(), "Squat", "8", "225", "2024-01-01");

    assert!(temp_dir.path().join("data/liftlog.db").exists());
}

#[test]
fn test_workout_list_filters_by_date() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    add_workout(dir, "Squat", "8", "225", "2024-01-01");
    add_workout(dir, "Bench Press", "10", "135", "2024-01-02");

    cli(dir)
        .args(["workout", "list", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Squat"))
        .stdout(predicate::str::contains("Bench Press").not());

    cli(dir)
        .args(["workout", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Squat"))
        .stdout(predicate::str::contains("Bench Press"));
}

#[test]
fn test_workout_edit_changes_only_given_fields() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    add_workout(dir, "Squat", "8", "225", "2024-01-01");

    cli(dir)
        .args(["workout", "edit", "1", "--weight", "235"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout updated"))
        .stdout(predicate::str::contains("3x8 @ 235 lbs"))
        .stdout(predicate::str::contains("2024-01-01"));
}

#[test]
fn test_invalid_workout_rejected() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["workout", "add", "--name", "Squat", "--reps", "0"])
        .args(["--sets", "3", "--weight", "225"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reps must be at least 1"));
}

#[test]
fn test_delete_requires_confirmation() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    add_workout(dir, "Squat", "8", "225", "2024-01-01");

    cli(dir)
        .args(["workout", "delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    cli(dir)
        .args(["workout", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Squat"));

    cli(dir)
        .args(["workout", "delete", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout 1 deleted"));

    cli(dir)
        .args(["workout", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged"));
}

#[test]
fn test_delete_missing_id_fails() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["meal", "delete", "99", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No meal with id 99"));
}

#[test]
fn test_meal_roundtrip_with_totals() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    for (name, calories, protein) in [("Chicken and Rice", "500", "40"), ("Protein Shake", "180", "30")] {
        cli(dir)
            .args(["meal", "add", "--name", name, "--calories", calories])
            .args(["--protein", protein, "--date", "2024-01-01"])
            .assert()
            .success();
    }

    cli(dir)
        .args(["meal", "list", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chicken and Rice"))
        .stdout(predicate::str::contains("Total: 680 kcal, 70 g protein"));
}

#[test]
fn test_weight_list_newest_first_with_limit() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    add_weight(dir, "180", "2024-01-01");
    add_weight(dir, "183", "2024-01-10");

    cli(dir)
        .args(["weight", "list", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("183 lbs"))
        .stdout(predicate::str::contains("180 lbs").not());
}

#[test]
fn test_maxes_with_bodyweight_ratio() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    add_workout(dir, "Deadlift", "1", "360", "2024-01-01");
    add_workout(dir, "Squat", "8", "225", "2024-01-01");
    add_weight(dir, "180", "2024-01-01");

    cli(dir)
        .arg("maxes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deadlift"))
        .stdout(predicate::str::contains("360 lbs  2.00x bodyweight"))
        .stdout(predicate::str::contains("279 lbs"));
}

#[test]
fn test_maxes_without_workouts() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("maxes")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged yet"));
}

#[test]
fn test_progress_json_rows() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    add_workout(dir, "Squat", "8", "225", "2024-01-01");
    add_workout(dir, "Squat", "5", "245", "2024-01-01");
    add_weight(dir, "180", "2024-01-02");
    add_weight(dir, "182", "2024-01-02");

    let output = cli(dir)
        .args(["progress", "--json"])
        .output()
        .expect("Failed to run progress");
    assert!(output.status.success());

    let rows: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("progress --json should print JSON");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["date"], "2024-01-01");
    assert_eq!(rows[0]["Squat"], 279.0);
    assert!(rows[0].get("Bodyweight").is_none());

    assert_eq!(rows[1]["date"], "2024-01-02");
    assert_eq!(rows[1]["Bodyweight"], 182.0);
    assert!(rows[1].get("Squat").is_none());
}

#[test]
fn test_progress_csv_export() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    add_workout(dir, "Squat", "8", "225", "2024-01-01");
    add_weight(dir, "180.5", "2024-01-02");

    let csv_path = dir.join("progress.csv");
    cli(dir)
        .args(["progress", "--csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 rows"));

    let contents = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,Squat,Bodyweight");
    assert_eq!(lines[1], "2024-01-01,279,");
    assert_eq!(lines[2], "2024-01-02,,180.5");
}

#[test]
fn test_reserved_exercise_name_rejected() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["workout", "add", "--name", "Bodyweight", "--reps", "5"])
        .args(["--sets", "3", "--weight", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved for the progress table"));
}

#[test]
fn test_meal_totals_beyond_u32() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    for _ in 0..2 {
        cli(dir)
            .args(["meal", "add", "--name", "Feast", "--calories", "4294967295"])
            .args(["--protein", "1", "--date", "2024-01-01"])
            .assert()
            .success();
    }

    cli(dir)
        .args(["meal", "list", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 8589934590 kcal, 2 g protein"));
}
