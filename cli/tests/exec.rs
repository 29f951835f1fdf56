//! # ExecRS CLI Exec Integration Tests
//!
//! File: cli/tests/exec.rs
//!
//! ## Overview
//!
//! Drives `execrs exec` end to end: output capture, validation, failure
//! reporting, and the exit status contract of the terminate policy.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_exec_prints_captured_output() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["exec", "--print", "--", "echo", "It works!"])
        .assert()
        .success()
        .stdout("It works!\n");
}

#[test]
fn test_exec_without_print_is_quiet() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["exec", "--", "echo", "hidden"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_exec_echo_always_mirrors_live() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["-v", "exec", "--echo", "always", "--", "sh", "-c", "echo out; echo err >&2"])
        .assert()
        .success()
        .stdout("out\n")
        .stderr(predicate::str::contains("err"));
}

#[test]
fn test_exec_empty_name_is_validation_error() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["exec", "--name", "", "--", "echo", "never"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Name property is required"));
}

#[test]
fn test_exec_missing_executable_is_start_error() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["exec", "--", "execrs-definitely-not-a-real-binary"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not start process"));
}

#[test]
fn test_exec_failure_returns_error() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["exec", "--print", "--", "sh", "-c", "echo before; echo broken >&2; exit 4"])
        .assert()
        .code(1)
        .stdout("before\n")
        .stderr(predicate::str::contains("broken"))
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_exec_terminate_exits_with_status_two() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["exec", "--on-failure", "terminate", "--", "sh", "-c", "exit 4"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Command 'sh' failed"));
}

#[test]
fn test_exec_terminate_verbose_prints_captured_stderr() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args([
            "-v",
            "exec",
            "--name",
            "noisy",
            "--on-failure",
            "terminate",
            "--",
            "sh",
            "-c",
            "echo diagnostic-text >&2; exit 1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("diagnostic-text"));
}

#[test]
fn test_exec_terminate_on_validation_failure() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["exec", "--name", "", "--on-failure", "terminate", "--", "true"])
        .assert()
        .code(2);
}

#[test]
fn test_exec_continue_on_failure_returns_control() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args([
            "exec",
            "--on-failure",
            "terminate",
            "--continue-on-failure",
            "--",
            "sh",
            "-c",
            "exit 4",
        ])
        .assert()
        .success();
}

#[test]
fn test_exec_working_directory_and_file_sink() {
    let sandbox = tempdir().unwrap();
    let workdir = sandbox.path().join("work");
    std::fs::create_dir(&workdir).unwrap();
    std::fs::write(workdir.join("marker.txt"), "").unwrap();

    execrs_cmd(sandbox.path())
        .args(["exec", "-w", "~/work", "--stdout-file", "logs/ls.out", "--", "ls"])
        .assert()
        .success();

    let copied = std::fs::read_to_string(sandbox.path().join("logs/ls.out")).unwrap();
    assert_eq!(copied, "marker.txt\n");
}

#[test]
fn test_exec_bad_working_directory() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["exec", "-w", "missing-dir", "--", "pwd"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not resolve working directory"));
}

#[test]
fn test_exec_combined_capture() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args([
            "exec",
            "--print",
            "--capture",
            "combined",
            "--",
            "sh",
            "-c",
            "echo a; echo b >&2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("a\n"))
        .stdout(predicate::str::contains("b\n"))
        .stdout(predicate::function(|out: &str| out.lines().count() == 2));
}

#[test]
fn test_exec_trace_verbosity_logs_each_line() {
    let sandbox = tempdir().unwrap();
    let output = execrs_cmd(sandbox.path())
        .args(["-vvv", "exec", "--", "sh", "-c", "echo out-line; echo err-line >&2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let logs = String::from_utf8_lossy(&output.stderr);
    let has_line = |level: &str, text: &str| {
        logs.lines()
            .any(|l| l.contains(level) && l.contains(text) && l.contains("command=sh"))
    };
    assert!(has_line("INFO", "out-line"), "{logs}");
    assert!(has_line("WARN", "err-line"), "{logs}");
    assert!(has_line("INFO", "Running command"), "{logs}");
    assert!(has_line("INFO", "Command succeeded"), "{logs}");
}

#[test]
fn test_exec_trace_verbosity_logs_failure() {
    let sandbox = tempdir().unwrap();
    let output = execrs_cmd(sandbox.path())
        .args(["-vvv", "exec", "--", "sh", "-c", "exit 3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let logs = String::from_utf8_lossy(&output.stderr);
    assert!(
        logs.lines().any(|l| l.contains("WARN")
            && l.contains("Command execution failed")
            && l.contains("command=sh")),
        "{logs}"
    );
}

#[test]
fn test_exec_echo_silent_logs_no_lines() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args([
            "-vvv",
            "exec",
            "--echo",
            "silent",
            "--",
            "sh",
            "-c",
            "echo out-line; echo err-line >&2",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Command succeeded"))
        .stderr(predicate::str::contains("out-line").not())
        .stderr(predicate::str::contains("err-line").not());
}

#[test]
fn test_exec_below_trace_verbosity_logs_no_lines() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args(["-vv", "exec", "--", "sh", "-c", "echo out-line; echo err-line >&2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("out-line").not())
        .stderr(predicate::str::contains("err-line").not());
}

#[test]
fn test_exec_rejects_stderr_file_when_discarding_stderr() {
    let sandbox = tempdir().unwrap();
    execrs_cmd(sandbox.path())
        .args([
            "exec",
            "--capture",
            "discard-stderr",
            "--stderr-file",
            "err.log",
            "--",
            "true",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("stderr is discarded"));
    assert!(!sandbox.path().join("err.log").exists());
}
