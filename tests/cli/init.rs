//! Tests for `credbroker init`.

use crate::support::*;

#[test]
fn test_init_creates_empty_config() {
    let t = Test::new();

    let output = t.init_cmd();
    assert_success(&output);
    assert_stdout_contains(&output, "created");

    assert!(t.config_path().exists());
    assert_plaintext(&t.config_contents());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.init_cmd();
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
    assert_eq!(t.config_contents(), SAMPLE_CONFIG);
}

#[test]
fn test_init_honors_config_flag() {
    let t = Test::new();
    let custom = t.home.path().join("elsewhere").join("cb.toml");

    let output = t
        .cmd()
        .arg("init")
        .arg("--config")
        .arg(&custom)
        .output()
        .unwrap();
    assert_success(&output);
    assert!(custom.exists());
    assert!(!t.config_path().exists());
}

#[cfg(unix)]
#[test]
fn test_init_writes_owner_only_file() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::init();
    let mode = std::fs::metadata(t.config_path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
