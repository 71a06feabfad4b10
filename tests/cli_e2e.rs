//! End-to-end CLI tests for the archive-downloader binary.
//!
//! Only argument handling is exercised; a full run would reach the live archive.

use assert_cmd::Command;
use predicates::prelude::*;

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("archive-downloader").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--folder"))
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("jfk_2025_release"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("archive-downloader").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that an out-of-range worker count is rejected before any network access.
#[test]
fn test_binary_zero_workers_rejected() {
    let mut cmd = Command::cargo_bin("archive-downloader").unwrap();
    cmd.args(["--workers", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that the worker cap is stated in --help and enforced.
#[test]
fn test_binary_worker_cap_is_documented_and_enforced() {
    let mut cmd = Command::cargo_bin("archive-downloader").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("counts above 100 are rejected"));

    let mut cmd = Command::cargo_bin("archive-downloader").unwrap();
    cmd.args(["--workers", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("101"));
}

/// Test that flags outside the documented surface are rejected.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("archive-downloader").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
