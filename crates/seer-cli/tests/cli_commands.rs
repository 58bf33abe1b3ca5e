//! Integration tests for the seer CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn seer() -> Command {
    Command::cargo_bin("seer").unwrap()
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_writes_text_log() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("log.txt");

    seer()
        .args(["run", "--q", "10", "--seed", "7", "--output"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("numMixerTmVolatileSeer"))
        .stdout(predicate::str::contains("Log written to"));

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("#        PING MIX        #"));
    assert!(content.contains("#       PING EVEN        #"));
    assert!(content.contains("#        PING ODD        #"));
    assert!(content.contains("#         STATS          #"));
    assert!(content.contains("# numMixerTmVolatileSeer #"));
    assert!(content.contains("State change failed (already set)."));
    assert!(content.contains("Requesting messages..."));
    assert!(content.contains("Final state:"));
}

#[test]
fn run_defaults_to_log_txt_in_working_dir() {
    let dir = TempDir::new().unwrap();

    seer()
        .current_dir(dir.path())
        .args(["run", "--seed", "1"])
        .assert()
        .success();

    assert!(dir.path().join("log.txt").exists());
}

#[test]
fn run_json_log_is_valid() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("log.json");

    seer()
        .args(["run", "--q", "12", "--seed", "3", "--json", "--output"])
        .arg(&log)
        .assert()
        .success();

    let content = fs::read_to_string(&log).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let entries = parsed["entries"].as_array().unwrap();
    assert!(!entries.is_empty());
}

#[test]
fn run_same_seed_same_log_body() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");

    for path in [&a, &b] {
        seer()
            .args(["run", "--seed", "99", "--output"])
            .arg(path)
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_to_string(&a).unwrap(),
        fs::read_to_string(&b).unwrap()
    );
}

#[test]
fn run_zero_countdown_exhausts_immediately() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("log.txt");

    seer()
        .args(["run", "--q", "10", "--countdown", "0", "--output"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("exhausted"));

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("Ping failed."));
    assert!(!content.contains("Ping successful"));
}

#[test]
fn run_zero_q_fails() {
    let dir = TempDir::new().unwrap();

    seer()
        .args(["run", "--q", "0", "--output"])
        .arg(dir.path().join("log.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn run_unwritable_output_fails() {
    let dir = TempDir::new().unwrap();

    seer()
        .args(["run", "--q", "10", "--output"])
        .arg(dir.path().join("missing").join("log.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot write to"));
}

// ---------------------------------------------------------------------------
// request
// ---------------------------------------------------------------------------

#[test]
fn request_plain_seer() {
    seer()
        .args(["request", "seer", "--q", "3", "--count", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Be Sure To Drink Your Ovaltine."))
        .stdout(predicate::str::contains("3 delivered, 0 rejected, 3 inactive"));
}

#[test]
fn request_accepts_aliases() {
    for variant in ["tmSeer", "volatile", "tm-volatile", "combined"] {
        seer()
            .args(["request", variant, "--seed", "5", "--count", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Requesting"));
    }
}

#[test]
fn request_unknown_variant_fails() {
    seer()
        .args(["request", "oracle-of-delphi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown oracle variant"));
}

#[test]
fn request_num_mixer_is_refused() {
    seer()
        .args(["request", "numMixer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not answer requests"));
}

#[test]
fn request_zero_q_fails() {
    seer()
        .args(["request", "seer", "--q", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn no_subcommand_shows_usage() {
    seer()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
