use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn manifest() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/flight_tests.yaml")
}

fn tas() -> Command {
    Command::cargo_bin("tas").expect("tas bin")
}

#[test]
fn legs_on_command_line_print_summary() {
    tas()
        .args(["--leg", "140@192", "--leg", "112@283", "--leg", "120@20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("True airspeed : 130.0 kt"))
        .stdout(predicate::str::contains("Heading leg 2 : 287.8°"))
        .stdout(predicate::str::contains("from 314.8° at 20.6 kt"));
}

#[test]
fn manifest_entry_renders_json() {
    let output = tas()
        .args(["--config", manifest().to_str().unwrap(), "--test", "calm"])
        .args(["--format", "json"])
        .output()
        .expect("run tas");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["name"], "calm");
    let tas = value["true_airspeed"].as_f64().unwrap();
    assert!((tas - 125.0).abs() < 1e-9, "tas = {tas}");
}

#[test]
fn degenerate_legs_fail_with_named_error() {
    tas()
        .args(["--leg", "140@192", "--leg", "140@192", "--leg", "120@20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("degenerate geometry"));
}

#[test]
fn wrong_leg_count_is_rejected() {
    tas()
        .args(["--leg", "140@192", "--leg", "112@283"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected exactly 3 observations"));
}

#[test]
fn malformed_leg_is_a_usage_error() {
    tas()
        .args(["--leg", "140/192"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SPEED@TRACK"));
}

#[test]
fn csv_output_file_for_single_test() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("runs/results.csv");

    tas()
        .args(["--config", manifest().to_str().unwrap(), "--test", "reference"])
        .args(["--format", "csv", "--output", out.to_str().unwrap()])
        .assert()
        .success();

    let text = fs::read_to_string(&out).expect("csv written");
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("name,units,tas"));
    assert!(lines[1].starts_with("reference,kt,129.99"));
}

#[test]
fn solving_all_stops_at_unsolvable_entry() {
    tas()
        .args(["--config", manifest().to_str().unwrap(), "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out-and-back"));
}

#[test]
fn rust_log_enables_solver_diagnostics() {
    tas()
        .env("RUST_LOG", "tas_solver=debug")
        .args(["--leg", "140@192", "--leg", "112@283", "--leg", "120@20"])
        .assert()
        .success()
        .stderr(predicate::str::contains("circle center located"));
}

#[test]
fn quiet_by_default_without_rust_log() {
    tas()
        .env_remove("RUST_LOG")
        .args(["--leg", "140@192", "--leg", "112@283", "--leg", "120@20"])
        .assert()
        .success()
        .stderr(predicate::str::contains("circle center located").not());
}

#[test]
fn units_flag_accepts_known_units_only() {
    tas()
        .args(["--units", "kmh"])
        .args(["--leg", "140@192", "--leg", "112@283", "--leg", "120@20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("True airspeed : 130.0 km/h"));

    tas()
        .args(["--units", "kts"])
        .args(["--leg", "140@192", "--leg", "112@283", "--leg", "120@20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown speed unit 'kts'"));
}

#[test]
fn csv_name_with_comma_stays_one_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let manifest = dir.path().join("gusty.toml");
    fs::write(
        &manifest,
        "name = \"run 4, gusty\"\nlegs = [\n  { groundspeed = 140, track = 192 },\n  { groundspeed = 112, track = 283 },\n  { groundspeed = 120, track = 20 },\n]\n",
    )
    .expect("write manifest");

    let output = tas()
        .args(["--config", manifest.to_str().unwrap(), "--format", "csv"])
        .output()
        .expect("run tas");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<_> = text.lines().collect();
    assert!(lines[1].starts_with("\"run 4, gusty\",kt,"), "{}", lines[1]);
    let header_width = lines[0].split(',').count();
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let row = reader.records().next().expect("one row").expect("valid csv");
    assert_eq!(row.len(), header_width);
    assert_eq!(&row[0], "run 4, gusty");
}
