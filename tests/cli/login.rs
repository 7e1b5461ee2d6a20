//! Tests for `credbroker login` that stop before any network call.

use crate::support::*;

#[test]
fn test_login_without_profiles() {
    let t = Test::with_config(EMPTY_CONFIG);

    let output = t.login("");
    assert_failure(&output);
    assert_stderr_contains(&output, "configuration has no saved profiles");
    assert_stderr_contains(&output, "[[profiles]]");
    assert_eq!(t.config_contents(), EMPTY_CONFIG);
}

#[test]
fn test_login_without_config() {
    let t = Test::new();

    let output = t.login("");
    assert_failure(&output);
    assert_stderr_contains(&output, "not found");
    assert_stderr_contains(&output, "credbroker init");
}

#[test]
fn test_login_needs_terminal_for_selection() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.login("");
    assert_failure(&output);
    assert_stderr_contains(&output, "interactive terminal");
    assert_eq!(t.config_contents(), SAMPLE_CONFIG);
}

#[test]
fn test_login_on_encrypted_config_unlocks_first() {
    let t = Test::encrypted(EMPTY_CONFIG, PASSPHRASE);

    let output = t.login(&format!("wrong\n{}\n", PASSPHRASE));
    assert_failure(&output);
    assert_stderr_contains(&output, "wrong passphrase");
    assert_stderr_contains(&output, "no saved profiles");
}
