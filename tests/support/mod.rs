//! Test support utilities for credbroker integration tests.
//!
//! Provides an isolated home directory and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated temporary home directory.
///
/// Child processes get `HOME` pointed at it, so the default configuration
/// path resolves inside the temp dir and tests can run in parallel.
pub struct Test {
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home }
    }

    /// Create a test environment with an empty configuration.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert_success(&output);
        t
    }

    /// Create a test environment with the given plaintext configuration.
    pub fn with_config(contents: &str) -> Self {
        let t = Self::new();
        let path = t.config_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        t
    }

    /// Create a test environment with `contents` encrypted under `passphrase`.
    pub fn encrypted(contents: &str, passphrase: &str) -> Self {
        let t = Self::with_config(contents);
        let output = t.crypto("encrypt", &format!("{0}\n{0}\n", passphrase));
        assert_success(&output);
        t
    }

    /// Default configuration path inside the temp home.
    pub fn config_path(&self) -> PathBuf {
        self.home.path().join(".credbroker").join("config.toml")
    }

    /// Current configuration file contents.
    pub fn config_contents(&self) -> String {
        std::fs::read_to_string(self.config_path()).expect("failed to read config")
    }
}
