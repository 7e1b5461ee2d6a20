//! Provider-native credentials files.
//!
//! Tools that only understand `~/.aws/credentials` can be fed the newest
//! session by rendering it as the `[default]` profile. This is a projection:
//! it reads a [`Session`] and never touches the configuration model.
//!
//! Writing these files leaves temporary credentials in plaintext on disk, so
//! it only happens when explicitly enabled.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::config::Session;
use crate::core::store;
use crate::error::{ConfigError, Result};

/// Rendered file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub credentials: String,
    pub config: String,
}

/// Render a session as `credentials` and `config` file contents.
pub fn render(session: &Session) -> Rendered {
    let credentials = format!(
        "[default]\naws_access_key_id = {}\naws_secret_access_key = {}\naws_session_token = {}\n",
        session.access_key_id, session.secret_access_key, session.session_token
    );
    let config = format!("[default]\nregion = {}\noutput = json\n", session.region);
    Rendered {
        credentials,
        config,
    }
}

/// Locations of the provider-native files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFiles {
    pub credentials_path: PathBuf,
    pub config_path: PathBuf,
}

impl LegacyFiles {
    /// Standard locations, honoring `AWS_SHARED_CREDENTIALS_FILE` and
    /// `AWS_CONFIG_FILE`.
    pub fn from_env() -> Result<Self> {
        let aws_dir = || -> Result<PathBuf> {
            Ok(dirs::home_dir().ok_or(ConfigError::NoHomeDir)?.join(".aws"))
        };
        let credentials_path = match std::env::var_os("AWS_SHARED_CREDENTIALS_FILE") {
            Some(p) => PathBuf::from(p),
            None => aws_dir()?.join("credentials"),
        };
        let config_path = match std::env::var_os("AWS_CONFIG_FILE") {
            Some(p) => PathBuf::from(p),
            None => aws_dir()?.join("config"),
        };
        Ok(Self {
            credentials_path,
            config_path,
        })
    }

    /// Overwrite both files with the rendering of `session`.
    pub fn write(&self, session: &Session) -> Result<()> {
        let rendered = render(session);
        debug!(
            credentials = %self.credentials_path.display(),
            config = %self.config_path.display(),
            "writing provider credentials files"
        );
        store::write_atomic(&self.credentials_path, |w: &mut dyn Write| {
            w.write_all(rendered.credentials.as_bytes())
        })?;
        store::write_atomic(&self.config_path, |w: &mut dyn Write| {
            w.write_all(rendered.config.as_bytes())
        })?;
        Ok(())
    }
}

/// Mirror `session` into the provider files when `enabled`.
///
/// Returns whether anything was written.
pub fn mirror(session: &Session, enabled: bool, files: &LegacyFiles) -> Result<bool> {
    if !enabled {
        return Ok(false);
    }
    info!(session = %session.name, "mirroring session to provider credentials files");
    files.write(session)?;
    Ok(true)
}
