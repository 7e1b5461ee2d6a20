//! On-disk configuration store.
//!
//! The configuration file holds either plaintext TOML or an encrypted
//! [`Envelope`]. The store reads and writes it as-is; unlocking an envelope
//! is the caller's job (see [`crate::core::unlock`]).

mod fs;

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::cipher::{Codec, Envelope};
use crate::core::config::Config;
use crate::core::constants;
use crate::error::{ConfigError, Result};

pub(crate) use fs::write_atomic;

/// Configuration as found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum Stored {
    /// Plaintext configuration.
    Plain(Config),
    /// Encrypted configuration awaiting a passphrase.
    Encrypted(Envelope),
}

impl Stored {
    /// Whether this is an encrypted envelope.
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Stored::Encrypted(_))
    }
}

/// Reads and writes the configuration file at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    codec: Codec,
}

impl ConfigStore {
    /// Store at an explicit path using the default codec.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codec: Codec::default(),
        }
    }

    /// Store at an explicit path using a specific codec.
    pub fn with_codec(path: impl Into<PathBuf>, codec: Codec) -> Self {
        Self {
            path: path.into(),
            codec,
        }
    }

    /// Default location: `~/.credbroker/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Codec used for encryption.
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Check if the configuration file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the raw file contents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file is absent, or
    /// `ConfigError::ReadFile` on any other read failure.
    pub fn load_raw(&self) -> Result<String> {
        debug!(path = %self.path.display(), "loading config");
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                fs::check_permissions(&self.path);
                Ok(contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::NotFound(self.path.display().to_string()).into())
            }
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    /// Classify raw contents without decrypting.
    pub fn is_encrypted(contents: &str) -> bool {
        Envelope::is_envelope(contents)
    }

    /// Load the configuration, leaving an envelope encrypted.
    ///
    /// # Errors
    ///
    /// Propagates read errors, TOML parse errors and malformed envelopes.
    pub fn load_as_is(&self) -> Result<Stored> {
        let contents = self.load_raw()?;
        if Self::is_encrypted(&contents) {
            debug!("config is encrypted");
            Ok(Stored::Encrypted(Envelope::parse(&contents)?))
        } else {
            Ok(Stored::Plain(Config::from_toml(&contents)?))
        }
    }

    /// Overwrite the file with `stored`, atomically.
    ///
    /// Plaintext is written in the canonical form produced by
    /// [`Config::to_toml`]. Loading and saving a file this store wrote leaves
    /// it byte-identical; a hand-edited file is rewritten in canonical form,
    /// dropping its comments and layout while keeping every value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails; in that case
    /// the previous file is unchanged.
    pub fn save_as_is(&self, stored: &Stored) -> Result<()> {
        let contents = match stored {
            Stored::Plain(config) => config.to_toml()?,
            Stored::Encrypted(envelope) => envelope.seal()?,
        };
        debug!(
            path = %self.path.display(),
            encrypted = stored.is_encrypted(),
            "saving config"
        );
        fs::write_atomic(&self.path, |w: &mut dyn Write| w.write_all(contents.as_bytes()))
    }

    /// Save a configuration, encrypting it when a passphrase is given.
    pub fn save(&self, config: &Config, passphrase: Option<&str>) -> Result<()> {
        let stored = self.seal(config, passphrase)?;
        self.save_as_is(&stored)
    }

    /// Produce the on-disk form of `config` without writing it.
    pub fn seal(&self, config: &Config, passphrase: Option<&str>) -> Result<Stored> {
        match passphrase {
            Some(passphrase) => {
                let plaintext = zeroize::Zeroizing::new(config.to_toml()?);
                let envelope = self.codec.encrypt(plaintext.as_bytes(), passphrase)?;
                Ok(Stored::Encrypted(envelope))
            }
            None => Ok(Stored::Plain(config.clone())),
        }
    }

    /// Create an empty plaintext configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyExists` if a file is already present.
    pub fn init(&self) -> Result<()> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(self.path.display().to_string()).into());
        }
        self.save_as_is(&Stored::Plain(Config::new()))
    }
}
