//! Error reporting and global flag tests.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_malformed_config_reports_parse_error() {
    let t = Test::with_config("profiles = [[[");

    let output = t.sessions("");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse configuration");
}

#[test]
fn test_malformed_envelope_is_not_retried() {
    let t = Test::with_config("{\"version\": \"credbroker-envelope-v1\"}");

    let output = t.sessions("a\nb\nc\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed encrypted envelope");
}

#[test]
fn test_config_env_var_overrides_default() {
    let t = Test::new();
    let custom = t.home.path().join("env.toml");

    let output = t
        .cmd()
        .arg("init")
        .env("CREDBROKER_CONFIG", &custom)
        .output()
        .unwrap();
    assert_success(&output);
    assert!(custom.exists());
}

#[test]
fn test_attempt_limit_from_env() {
    let t = Test::encrypted(SAMPLE_CONFIG, PASSPHRASE);

    let output = t
        .cmd()
        .args(["crypto", "decrypt"])
        .env("CREDBROKER_MAX_PASSPHRASE_ATTEMPTS", "2")
        .write_stdin(format!("a\nb\n{}\n", PASSPHRASE))
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "giving up after 2");
}

#[test]
fn test_completions() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credbroker"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    t.cmd()
        .arg("assume")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.cmd().args(["--verbose", "sessions"]).output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "loading config");
}
