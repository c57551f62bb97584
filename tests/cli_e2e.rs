//! End-to-end CLI tests for the figma-export binary.

use assert_cmd::Command;
use predicates::prelude::*;

/// Builds a command with the Figma environment variables cleared, so tests
/// never pick up credentials from the developer's shell.
fn figma_export() -> Command {
    let mut cmd = Command::cargo_bin("figma-export").unwrap();
    cmd.env_remove("FIGMA_TOKEN")
        .env_remove("FIGMA_FILE_URL")
        .env_remove("FIGMA_API_BASE");
    cmd
}

/// Missing token fails before any network call, with a descriptive message.
#[test]
fn test_binary_missing_token_is_fatal() {
    let mut cmd = figma_export();
    cmd.env("FIGMA_FILE_URL", "https://www.figma.com/file/aBc123/Design?x=1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FIGMA_TOKEN"));
}

/// Missing file URL fails before any network call.
#[test]
fn test_binary_missing_file_url_is_fatal() {
    let mut cmd = figma_export();
    cmd.env("FIGMA_TOKEN", "token")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FIGMA_FILE_URL"));
}

/// A URL without a `file/<key>/` segment fails before any network call.
#[test]
fn test_binary_url_without_file_key_is_fatal() {
    let mut cmd = figma_export();
    cmd.env("FIGMA_TOKEN", "token")
        .env("FIGMA_FILE_URL", "https://www.figma.com/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file key"));
}

/// A bad value for a recognized override key is fatal.
#[test]
fn test_binary_bad_format_override_is_fatal() {
    let mut cmd = figma_export();
    cmd.env("FIGMA_TOKEN", "token")
        .env("FIGMA_FILE_URL", "https://www.figma.com/file/aBc123/Design?x=1")
        .arg("format=bmp")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bmp"));
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = figma_export();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Export Figma components"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = figma_export();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("figma-export"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = figma_export();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
