use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("forest-cover").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("forest-cover"));
}

#[test]
fn plot_rejects_bad_years() {
    let mut cmd = Command::cargo_bin("forest-cover").unwrap();
    cmd.args(["plot", "--years", "ninety"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid year"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn plot_online_small() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("forest.svg");
    let mut cmd = Command::cargo_bin("forest-cover").unwrap();
    cmd.args([
        "plot",
        "--years",
        "2000",
        "--out",
        out.to_str().unwrap(),
    ]);
    cmd.assert().success();
}
