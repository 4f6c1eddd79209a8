//! End-to-end CLI tests for convoport.
//!
//! These run the actual binary. None of them needs network access: they
//! cover argument parsing and the checks that fail before any request, plus
//! a transport failure against a closed local port.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn convoport() -> Command {
    let mut cmd = Command::from_std(std::process::Command::new(env!("CARGO_BIN_EXE_convoport")));
    cmd.env_remove("CONVOPORT_API_KEY");
    for var in ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help() {
    convoport()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("messages"))
        .stdout(predicate::str::contains("conversation"));
}

#[test]
fn test_version() {
    convoport()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("convoport"));
}

#[test]
fn test_missing_subcommand() {
    convoport().assert().failure();
}

#[test]
fn test_missing_api_key_file() {
    let dir = tempdir().unwrap();
    convoport()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_empty_api_key() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("api_key"), "\n").unwrap();

    convoport()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key provided"));

    assert!(!dir.path().join("intercom_conversation_list.csv").exists());
}

#[test]
fn test_api_key_from_env_overrides_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("api_key"), "").unwrap();

    // The env key passes the credential check; the missing index then fails
    // with a read error rather than an auth error.
    convoport()
        .current_dir(dir.path())
        .env("CONVOPORT_API_KEY", "app:secret")
        .args(["messages", "--index", "missing.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key provided").not())
        .stderr(predicate::str::contains("CSV error"));
}

#[test]
fn test_conflicting_page_flags() {
    convoport()
        .args(["list", "--all", "--end-page", "3"])
        .assert()
        .failure();
}

#[test]
fn test_empty_index_exports_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("api_key"), "key\n").unwrap();
    fs::write(dir.path().join("index.csv"), "").unwrap();

    convoport()
        .current_dir(dir.path())
        .args(["messages", "--index", "index.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Intercom HTTP)"))
        .stdout(predicate::str::contains("Conversations:  0"));
}

#[test]
fn test_invalid_base_url() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("api_key"), "key\n").unwrap();

    convoport()
        .current_dir(dir.path())
        .args(["list", "--base-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing or invalid base URL"));
}

#[test]
fn test_unreachable_api_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("api_key"), "key\n").unwrap();
    fs::write(dir.path().join("index.csv"), "147,1,s,u,user\n").unwrap();

    convoport()
        .current_dir(dir.path())
        .args([
            "messages",
            "--index",
            "index.csv",
            "--skip-failed",
            "--base-url",
            "http://127.0.0.1:9",
            "--timeout",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped:        1 (147)"));

    assert!(!dir.path().join("messages").join("147").exists());
}

#[test]
fn test_unreachable_api_aborts_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("api_key"), "key\n").unwrap();

    convoport()
        .current_dir(dir.path())
        .args(["conversation", "147", "--base-url", "http://127.0.0.1:9", "--timeout", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_conversation_rejects_empty_id() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("api_key"), "key\n").unwrap();

    convoport()
        .current_dir(dir.path())
        .args(["conversation", "", "--base-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing or invalid conversation ID"));
}
