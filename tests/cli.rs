use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use sustain_charts::paths::root_directory;
use tempfile::tempdir;

fn sample(name: &str) -> String {
    root_directory()
        .join("data/samples")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("sustain-charts").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sustain-charts"));
}

#[test]
fn palette_prints_one_color_per_line() {
    let mut cmd = Command::cargo_bin("sustain-charts").unwrap();
    cmd.args(["palette", "2"]);
    cmd.assert()
        .success()
        .stdout(predicate::eq("#bf2626\n#26bfbf\n"));
}

#[test]
fn negative_palette_is_empty() {
    let mut cmd = Command::cargo_bin("sustain-charts").unwrap();
    cmd.args(["palette", "-1"]);
    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn scales_over_two_scenarios() {
    let mut cmd = Command::cargo_bin("sustain-charts").unwrap();
    cmd.args([
        "scales",
        "--data",
        &sample("reference_scenario.json"),
        &sample("ambitious_scenario.json"),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("min=1.7 max=18.4"));
}

#[test]
fn cards_are_truncated_integers() {
    let mut cmd = Command::cargo_bin("sustain-charts").unwrap();
    cmd.args(["cards", "--data", &sample("reference_scenario.json")]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("24730 Mt"))
        .stdout(predicate::str::contains("14 EJ"));
}

#[test]
fn bars_writes_one_chart_per_scenario() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bars.svg");
    let mut cmd = Command::cargo_bin("sustain-charts").unwrap();
    cmd.args([
        "bars",
        "--data",
        &sample("reference_scenario.json"),
        &sample("ambitious_scenario.json"),
        "--out",
        out.to_str().unwrap(),
        "--emit-json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"Consommations\""));
    assert!(dir.path().join("bars_0.svg").exists());
    assert!(dir.path().join("bars_1.svg").exists());
}

#[test]
fn scenario_with_missing_file_fails() {
    let mut cmd = Command::cargo_bin("sustain-charts").unwrap();
    cmd.args(["scenario", "--data", "does-not-exist.json"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load process data"));
}
