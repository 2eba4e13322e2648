//! Binary tests for `keypad-calc eval`

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn keypad_calc() -> Command {
    let mut cmd = Command::cargo_bin("keypad-calc").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("KEYPAD_CALC_LOG")
        .env_remove("KEYPAD_CALC_HISTORY");
    cmd
}

#[test]
fn test_eval_prints_formula_and_display() {
    keypad_calc()
        .args(["eval", "2+3*4="])
        .assert()
        .success()
        .stdout("2+3*4=14\n14\n");
}

#[test]
fn test_eval_leading_minus() {
    keypad_calc()
        .args(["eval", "-5*2="])
        .assert()
        .success()
        .stdout("-5*2=-10\n-10\n");
}

#[test]
fn test_eval_division_by_zero() {
    keypad_calc()
        .args(["eval", "5/0="])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("Infinity\n"));
}

#[test]
fn test_eval_json() {
    let output = keypad_calc()
        .args(["eval", "--json", "1/3="])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["view"]["display"], "0.333333333333");
    assert_eq!(value["state"]["evaluated"], true);
}

#[test]
fn test_eval_history_env() {
    let output = keypad_calc()
        .env("KEYPAD_CALC_HISTORY", "1")
        .args(["eval", "--json", "1=2="])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["history"].as_array().unwrap().len(), 1);
}

#[test]
fn test_zero_history_rejected() {
    keypad_calc()
        .args(["--history", "0", "eval", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("history capacity"));
}

#[test]
fn test_invalid_log_level_rejected() {
    keypad_calc()
        .args(["--log-level", "calc=[", "eval", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log level"));
}

#[test]
fn test_eval_requires_keys() {
    keypad_calc().arg("eval").assert().failure();
}
