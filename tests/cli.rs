use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("ohi").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ohi"));
}

#[test]
fn chart_command_renders_and_exports() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    fs::write(
        &input,
        "Country,Year,Value\n\
         Austria,2018,120\n\
         Austria,2019,118\n\
         Belgium,2018,150\n\
         Belgium,2019,149\n",
    )
    .unwrap();
    let out = dir.path().join("chart.svg");
    let export = dir.path().join("view.json");

    let mut cmd = Command::cargo_bin("ohi").unwrap();
    cmd.args([
        "chart",
        "--input",
        input.to_str().unwrap(),
        "--kind",
        "line",
        "--out",
        out.to_str().unwrap(),
        "--country",
        "Austria",
        "--max-year",
        "2019",
        "--export",
        export.to_str().unwrap(),
        "--stats",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Austria"));
    assert!(out.exists());

    // The export holds the filtered view, not the raw load.
    let exported = fs::read_to_string(&export).unwrap();
    assert!(exported.contains("Austria"));
    assert!(!exported.contains("Belgium"));
}

#[test]
fn missing_input_fails_without_partial_output() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("chart.svg");
    let mut cmd = Command::cargo_bin("ohi").unwrap();
    cmd.args([
        "chart",
        "--input",
        dir.path().join("nope.csv").to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    cmd.assert().failure();
    assert!(!out.exists());
}
