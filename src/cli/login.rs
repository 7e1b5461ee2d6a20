//! Login command.
//!
//! Runs the interactive role assumption flow against AWS STS, caches the
//! session and optionally mirrors it into `~/.aws/credentials`.

use tracing::info;

use crate::cli::prompt::TerminalPrompter;
use crate::cli::{open_vault, output, Settings};
use crate::core::legacy::{self, LegacyFiles};
use crate::core::login;
use crate::core::sts::AwsConnector;
use crate::error::Result;

/// Assume a role and cache the resulting session.
pub fn execute(settings: &Settings) -> Result<()> {
    let mut prompter = TerminalPrompter::new();
    let mut vault = open_vault(settings, &mut prompter)?;
    let connector = AwsConnector::new(settings.sts_timeout);

    let session = login::login(&mut vault, &mut prompter, &connector, &whoami::username())?;

    output::success(&format!("logged in to {}", session.name));
    output::kv("region", &session.region);
    output::kv("expires", session.expiry.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S %Z"));

    if settings.write_credentials_file {
        let files = LegacyFiles::from_env()?;
        if legacy::mirror(&session, true, &files)? {
            info!("provider credentials files updated");
            output::warn(&format!(
                "temporary credentials written in plaintext to {}",
                output::path(files.credentials_path.display())
            ));
        }
    }
    Ok(())
}
