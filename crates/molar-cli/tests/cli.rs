//! Integration tests for the molar binary

use assert_cmd::Command;
use predicates::prelude::*;

fn molar() -> Command {
    Command::cargo_bin("molar").unwrap()
}

#[test]
fn parse_water_human_output() {
    molar()
        .args(["parse", "H2O", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("H: 2"))
        .stdout(predicate::str::contains("O: 1"));
}

#[test]
fn parse_nested_formula() {
    molar()
        .args(["parse", "K4[ON(SO3)2]2", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("K: 4"))
        .stdout(predicate::str::contains("O: 5"))
        .stdout(predicate::str::contains("S: 4"));
}

#[test]
fn parse_json_output() {
    let output = molar()
        .args(["parse", "H2O", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["formula"], "H2O");
    assert_eq!(reports[0]["counts"]["H"], 2);
    assert_eq!(reports[0]["counts"]["O"], 1);
    assert!(reports[0]["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn malformed_formula_exits_nonzero() {
    molar()
        .args(["parse", "Hee2", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("consecutive_lowercase"));
}

#[test]
fn debug_flag_prints_tokens() {
    molar()
        .args(["parse", "H2O", "--debug", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tokens:"));
}

#[test]
fn samples_catalogue_runs_clean_exit() {
    // The catalogue includes deliberately malformed formulas; they must
    // not affect the exit code.
    molar()
        .args(["samples", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fremy_salt"))
        .stdout(predicate::str::contains("expected_failure_1"));
}

#[test]
fn completion_generation_works() {
    molar()
        .args(["--generate-completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("molar"));
}
