//! Error scenario integration tests

use std::process::Command;

fn prompt_lens_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_prompt-lens"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn assert_fails_with(args: &[&str], needles: &[&str]) {
    let config_home = tempfile::tempdir().unwrap();
    let output = prompt_lens_bin()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args(args)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "{:?} should fail", args);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        needles.iter().any(|n| stderr.contains(n)),
        "Expected one of {:?} for {:?}, got: {}",
        needles,
        args,
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    assert_fails_with(&["config", "get", "unknown_key"], &["Unknown key", "Valid keys"]);
}

#[test]
fn config_set_unknown_key() {
    assert_fails_with(
        &["config", "set", "unknown_key", "value"],
        &["Unknown key", "Valid keys"],
    );
}

#[test]
fn config_set_invalid_display_mode() {
    assert_fails_with(&["config", "set", "display_mode", "popup"], &["display_mode"]);
}

#[test]
fn config_set_invalid_timeout() {
    assert_fails_with(&["config", "set", "timeout_secs", "0"], &["positive"]);
}

#[test]
fn config_set_invalid_endpoint() {
    assert_fails_with(&["config", "set", "endpoint", "localhost:8000"], &["http"]);
}

#[test]
fn config_set_invalid_hotkey() {
    assert_fails_with(&["config", "set", "hotkeys.analyze", "Ctrl+Nope"], &["hotkeys.analyze"]);
}

#[test]
fn config_list_with_no_file() {
    let config_home = tempfile::tempdir().unwrap();
    let output = prompt_lens_bin()
        .args(["config", "list"])
        .env("XDG_CONFIG_HOME", config_home.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("endpoint"), "got: {}", stdout);
    assert!(stdout.contains("not set"), "got: {}", stdout);
}
