//! Integration tests for argument parsing and precondition errors.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn oxy() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("oxy"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// --- NO_COLOR environment ---

#[test]
fn test_cli_accepts_no_color_set_to_one() {
    Command::new(assert_cmd::cargo::cargo_bin!("oxy"))
        .env("NO_COLOR", "1")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn test_cli_accepts_empty_or_falsey_no_color() {
    for value in ["", "0", "false", "no"] {
        Command::new(assert_cmd::cargo::cargo_bin!("oxy"))
            .env("NO_COLOR", value)
            .arg("--version")
            .assert()
            .success();
    }
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    oxy().assert().code(2).stderr(predicate::str::contains(
        "Build the ALICE O2 software stack",
    ));
}

#[test]
fn test_cli_help_lists_every_subcommand() {
    let assert = oxy().arg("--help").assert().success();
    let mut out = predicate::str::contains("Usage:").boxed();
    for sub in ["init", "init-container", "build", "clean", "shell"] {
        out = out.and(predicate::str::contains(sub)).boxed();
    }
    assert.stdout(out);
}

#[test]
fn test_cli_version_flag_shows_version() {
    oxy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("oxy"));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    oxy().arg("frobnicate").assert().code(2);
}

// --- Argument validation ---

#[test]
fn test_init_container_rejects_two_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    oxy()
        .current_dir(dir.path())
        .args(["init-container", "a", "b"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_build_rejects_unknown_target() {
    let dir = tempfile::tempdir().expect("tempdir");
    oxy()
        .current_dir(dir.path())
        .args(["build", "root"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("possible values"));
}

#[test]
fn test_build_rejects_zero_jobs() {
    let dir = tempfile::tempdir().expect("tempdir");
    oxy()
        .current_dir(dir.path())
        .args(["build", "-j", "0"])
        .assert()
        .code(2);
}

// --- Preconditions in an empty directory ---

#[test]
fn test_build_without_container_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    oxy()
        .current_dir(dir.path())
        .args(["build", "--no-fetch"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no container registered"))
        .stderr(predicate::str::contains("oxy init-container"));
}

#[test]
fn test_clean_without_container_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    oxy()
        .current_dir(dir.path())
        .arg("clean")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no container registered"));
}

#[test]
fn test_shell_without_container_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    oxy()
        .current_dir(dir.path())
        .args(["shell", "ls", "-la"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no container registered"));
}

#[test]
fn test_init_container_outside_workspace_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    oxy()
        .current_dir(dir.path())
        .arg("init-container")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("oxy init"));
    assert!(!dir.path().join(".oxy.json").exists());
}
