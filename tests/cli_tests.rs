//! CLI integration tests

use std::process::{Command, Stdio};

use predicates::prelude::*;

fn prompt_lens_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_prompt-lens"));
    cmd.env("NO_COLOR", "1").env_remove("PROMPT_LENS_ENDPOINT");
    cmd
}

#[test]
fn help_output() {
    assert_cmd::Command::cargo_bin("prompt-lens")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("scoring service")
                .and(predicate::str::contains("--endpoint"))
                .and(predicate::str::contains("--timeout"))
                .and(predicate::str::contains("--details"))
                .and(predicate::str::contains("--copy"))
                .and(predicate::str::contains("--daemon"))
                .and(predicate::str::contains("--mode")),
        );
}

#[test]
fn version_output() {
    assert_cmd::Command::cargo_bin("prompt-lens")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("prompt-lens")
                .and(predicate::str::contains(env!("CARGO_PKG_VERSION"))),
        );
}

#[test]
fn config_path_command() {
    let output = prompt_lens_bin()
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("prompt-lens"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let output = prompt_lens_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn daemon_help() {
    let output = prompt_lens_bin()
        .args(["daemon", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("replace"));
    assert!(stdout.contains("toggle-mode"));
    assert!(stdout.contains("status"));
}

#[test]
fn mode_requires_daemon() {
    let output = prompt_lens_bin()
        .args(["--mode", "alert", "some text"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--daemon"),
        "Expected error about missing --daemon, got: {}",
        stderr
    );
}

#[test]
fn invalid_mode_error() {
    let output = prompt_lens_bin()
        .args(["--daemon", "--mode", "popup"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid") || stderr.contains("possible values"),
        "Expected error about invalid mode, got: {}",
        stderr
    );
}

#[test]
fn daemon_text_conflict() {
    let output = prompt_lens_bin()
        .args(["--daemon", "score me"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cannot be used with"),
        "Expected conflict error, got: {}",
        stderr
    );
}

#[test]
fn empty_input_is_usage_error() {
    let config_home = tempfile::tempdir().unwrap();
    let output = prompt_lens_bin()
        .env("XDG_CONFIG_HOME", config_home.path())
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Nothing to score"), "got: {}", stderr);
}

#[test]
fn unreachable_endpoint_fails() {
    let config_home = tempfile::tempdir().unwrap();
    let output = prompt_lens_bin()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args(["--endpoint", "http://127.0.0.1:9", "--timeout", "2", "fix my code"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Could not reach the scoring service"),
        "got: {}",
        stderr
    );
}

#[test]
fn daemon_command_without_daemon() {
    let runtime_dir = tempfile::tempdir().unwrap();
    let output = prompt_lens_bin()
        .env("XDG_RUNTIME_DIR", runtime_dir.path())
        .args(["daemon", "status"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No daemon running"), "got: {}", stderr);
}

#[cfg(target_os = "linux")]
#[test]
fn config_set_then_get() {
    let config_home = tempfile::tempdir().unwrap();

    let set = prompt_lens_bin()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args(["config", "set", "display_mode", "alert"])
        .output()
        .expect("Failed to execute command");
    assert!(set.status.success(), "{}", String::from_utf8_lossy(&set.stderr));

    let get = prompt_lens_bin()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args(["config", "get", "display_mode"])
        .output()
        .expect("Failed to execute command");
    assert!(get.status.success());
    assert_eq!(String::from_utf8_lossy(&get.stdout).trim(), "alert");

    let file = config_home.path().join("prompt-lens").join("config.toml");
    assert!(file.exists());
}
