use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn inspect_lists_device_cards_and_ports() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gigavue-migrate"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/hc2-small.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[sections]"))
        .stdout(predicate::str::contains("- port-alias: "))
        .stdout(predicate::str::contains("hostname=gv-hc2-01"))
        .stdout(predicate::str::contains("hw_type=CHS-HC2"))
        .stdout(predicate::str::contains("cards=2"))
        .stdout(predicate::str::contains("ports=44"))
        .stdout(predicate::str::contains(
            "- 1/1/x1 type=network admin=enabled speed=10G alias=core-sw-a",
        ));
}

#[test]
fn inspect_json_round_trips_the_inventory() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gigavue-migrate"));
    let output = cmd
        .arg("inspect")
        .arg(fixture("fixtures/hc2-gigasmart.log"))
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(parsed["device"]["hostname"], "gv-hc2-02");
    assert_eq!(parsed["gsops"][0]["alias"], "dedup-all");
    assert_eq!(parsed["gsgroups"][0]["ports"][0]["Resolved"], "1/3/e1");
}

#[test]
fn inspect_verbose_lists_unclaimed_lines() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("mixed.log");
    fs::write(
        &input,
        "show widgets\nmystery output\nshow chassis\nHostname: gv-x\nshow card\nSlot  Config  Oper  HW Type\n1  yes  up  PRT-HC0-X24\n",
    )
    .expect("write");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gigavue-migrate"));
    cmd.arg("inspect")
        .arg(&input)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("unclaimed_lines=2"))
        .stdout(predicate::str::contains("- mystery output"));
}

#[test]
fn inspect_reports_read_failure_with_path() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gigavue-migrate"));
    cmd.arg("inspect")
        .arg("does-not-exist.log")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.log"));
}
