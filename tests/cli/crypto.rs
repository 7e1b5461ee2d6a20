//! Tests for `credbroker crypto`.

use crate::support::*;

#[test]
fn test_encrypt_plain_config() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.crypto("encrypt", &format!("{0}\n{0}\n", PASSPHRASE));
    assert_success(&output);
    assert_stdout_contains(&output, "configuration encrypted");

    let contents = t.config_contents();
    assert_encrypted(&contents);
    assert!(!contents.contains("hub-secret"));
    assert!(!contents.contains("fresh-token"));
}

#[test]
fn test_encrypt_rejects_mismatched_confirmation() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.crypto("encrypt", "one\ntwo\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "passphrases do not match");
    assert_eq!(t.config_contents(), SAMPLE_CONFIG);
}

#[test]
fn test_encrypt_twice_fails() {
    let t = Test::encrypted(SAMPLE_CONFIG, PASSPHRASE);

    let output = t.crypto("encrypt", &format!("{}\n", PASSPHRASE));
    assert_failure(&output);
    assert_stderr_contains(&output, "already encrypted");
}

#[test]
fn test_decrypt_restores_plaintext() {
    let t = Test::encrypted(SAMPLE_CONFIG, PASSPHRASE);

    let output = t.crypto("decrypt", &format!("{}\n", PASSPHRASE));
    assert_success(&output);
    assert_stdout_contains(&output, "configuration decrypted");

    let contents = t.config_contents();
    assert_plaintext(&contents);
    assert!(contents.contains("acme/prod/readonly"));
}

#[test]
fn test_decrypt_plain_config_fails() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.crypto("decrypt", "");
    assert_failure(&output);
    assert_stderr_contains(&output, "not encrypted");
}

#[test]
fn test_wrong_passphrase_is_retried() {
    let t = Test::encrypted(SAMPLE_CONFIG, PASSPHRASE);

    let output = t.crypto("decrypt", &format!("nope\nstill nope\n{}\n", PASSPHRASE));
    assert_success(&output);
    assert_stderr_contains(&output, "wrong passphrase");
    assert_plaintext(&t.config_contents());
}

#[test]
fn test_attempt_limit_gives_up() {
    let t = Test::encrypted(SAMPLE_CONFIG, PASSPHRASE);
    let before = t.config_contents();

    let output = t.crypto_limited("decrypt", 1, &format!("nope\n{}\n", PASSPHRASE));
    assert_failure(&output);
    assert_stderr_contains(&output, "giving up after 1");
    assert_eq!(t.config_contents(), before);
}

#[test]
fn test_end_of_input_cancels_unlock() {
    let t = Test::encrypted(SAMPLE_CONFIG, PASSPHRASE);
    let before = t.config_contents();

    let output = t.crypto("decrypt", "nope\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "cancelled");
    assert_eq!(t.config_contents(), before);
}

#[test]
fn test_change_passphrase() {
    let t = Test::encrypted(SAMPLE_CONFIG, PASSPHRASE);

    let output = t.crypto("change-passphrase", &format!("{}\nfresh\nfresh\n", PASSPHRASE));
    assert_success(&output);
    assert_stdout_contains(&output, "passphrase changed");
    assert_encrypted(&t.config_contents());

    let output = t.sessions(&format!("{}\n", PASSPHRASE));
    assert_failure(&output);

    let output = t.sessions("fresh\n");
    assert_success(&output);
    assert_stdout_contains(&output, "acme/prod/readonly");
}

#[test]
fn test_menu_requires_terminal() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.cmd().arg("crypto").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "interactive terminal");
}
