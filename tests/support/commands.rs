//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a credbroker command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - every CREDBROKER_* override cleared
    /// - colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("credbroker").expect("failed to find credbroker binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in [
            "CREDBROKER_CONFIG",
            "CREDBROKER_LOG",
            "CREDBROKER_MAX_PASSPHRASE_ATTEMPTS",
            "CREDBROKER_STS_TIMEOUT",
            "CREDBROKER_INSECURE_USE_AWS_CREDENTIALS_FILE",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.home.path());
        cmd
    }

    /// Shortcut for `credbroker init`.
    pub fn init_cmd(&self) -> Output {
        self.cmd()
            .arg("init")
            .output()
            .expect("failed to run credbroker init")
    }

    /// Shortcut for `credbroker crypto <action>` with piped input.
    pub fn crypto(&self, action: &str, stdin: &str) -> Output {
        self.cmd()
            .args(["crypto", action])
            .write_stdin(stdin)
            .output()
            .expect("failed to run credbroker crypto")
    }

    /// `credbroker crypto <action>` giving up after `max` wrong passphrases.
    pub fn crypto_limited(&self, action: &str, max: u32, stdin: &str) -> Output {
        self.cmd()
            .args(["crypto", action, "--max-passphrase-attempts"])
            .arg(max.to_string())
            .write_stdin(stdin)
            .output()
            .expect("failed to run credbroker crypto")
    }

    /// Shortcut for `credbroker sessions` with piped input.
    pub fn sessions(&self, stdin: &str) -> Output {
        self.cmd()
            .arg("sessions")
            .write_stdin(stdin)
            .output()
            .expect("failed to run credbroker sessions")
    }

    /// Shortcut for `credbroker sessions --json`.
    pub fn sessions_json(&self) -> Output {
        self.cmd()
            .args(["sessions", "--json"])
            .output()
            .expect("failed to run credbroker sessions --json")
    }

    /// Shortcut for `credbroker login`.
    pub fn login(&self, stdin: &str) -> Output {
        self.cmd()
            .arg("login")
            .write_stdin(stdin)
            .output()
            .expect("failed to run credbroker login")
    }
}
