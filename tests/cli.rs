#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("simulateur-cli").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn strategy_subcommand_prints_recommendation() {
    let mut cmd = Command::cargo_bin("simulateur-cli").unwrap();
    cmd.args([
        "strategy",
        "--start",
        "2025-11-03",
        "--end",
        "2025-11-09",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("standard"));
}

#[test]
fn validate_reads_a_bundle_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "scenarios": [],
            "trames": [],
            "rules": [],
            "staff": [],
            "history": []
        })
        .to_string(),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("simulateur-cli").unwrap();
    cmd.args(["--bundle", path.to_str().unwrap(), "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valides"));
}
