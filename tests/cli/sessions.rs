//! Tests for `credbroker sessions`.

use crate::support::*;

#[test]
fn test_sessions_lists_with_expiry_status() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.sessions("");
    assert_success(&output);

    let out = stdout(&output);
    let dev = out
        .lines()
        .find(|l| l.contains("acme/dev/developer"))
        .expect("dev session listed");
    let prod = out
        .lines()
        .find(|l| l.contains("acme/prod/readonly"))
        .expect("prod session listed");
    assert!(dev.contains("expired"));
    assert!(prod.contains("valid"));
}

#[test]
fn test_sessions_never_prints_secrets() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.sessions("");
    assert_success(&output);
    let out = stdout(&output);
    assert!(!out.contains("fresh-secret"));
    assert!(!out.contains("fresh-token"));
}

#[test]
fn test_sessions_json() {
    let t = Test::with_config(SAMPLE_CONFIG);

    let output = t.sessions_json();
    assert_success(&output);

    let entries: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "acme/dev/developer");
    assert_eq!(entries[0]["expired"], true);
    assert_eq!(entries[1]["expired"], false);
}

#[test]
fn test_sessions_empty() {
    let t = Test::init();

    let output = t.sessions("");
    assert_success(&output);
    assert_stdout_contains(&output, "no cached sessions");
}

#[test]
fn test_sessions_on_encrypted_config_is_read_only() {
    let t = Test::encrypted(SAMPLE_CONFIG, PASSPHRASE);
    let before = t.config_contents();

    let output = t.sessions(&format!("{}\n", PASSPHRASE));
    assert_success(&output);
    assert_stdout_contains(&output, "acme/dev/developer");
    assert_eq!(t.config_contents(), before);
}
