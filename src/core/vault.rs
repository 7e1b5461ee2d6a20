//! An opened configuration.
//!
//! Vault owns the decrypted [`Config`] for the duration of one command and
//! remembers whether, and with which passphrase, it has to be re-encrypted
//! on save.

use tracing::{debug, info};

use crate::core::config::Config;
use crate::core::store::{ConfigStore, Stored};
use crate::core::types::Passphrase;
use crate::core::unlock::{PassphraseSource, RetryGate};
use crate::error::{Result, ValidationError};

/// The decrypted configuration plus what is needed to write it back.
pub struct Vault {
    store: ConfigStore,
    config: Config,
    passphrase: Option<Passphrase>,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("path", &self.store.path())
            .field("config", &self.config)
            .field("encrypted", &self.passphrase.is_some())
            .finish()
    }
}

impl Vault {
    /// Load the configuration, unlocking it through `gate` if encrypted.
    ///
    /// `source` is only consulted when the file is encrypted.
    ///
    /// # Errors
    ///
    /// Propagates store errors and the gate's cancellation/exhaustion errors.
    pub fn open(
        store: ConfigStore,
        gate: &RetryGate,
        source: &mut dyn PassphraseSource,
    ) -> Result<Self> {
        match store.load_as_is()? {
            Stored::Plain(config) => {
                debug!("opened plaintext config");
                Ok(Self {
                    store,
                    config,
                    passphrase: None,
                })
            }
            Stored::Encrypted(envelope) => {
                let unlocked = gate.unlock(store.codec(), &envelope, source)?;
                debug!(attempts = unlocked.attempts, "opened encrypted config");
                Ok(Self {
                    store,
                    config: unlocked.config,
                    passphrase: Some(unlocked.passphrase),
                })
            }
        }
    }

    /// Wrap an in-memory configuration.
    pub fn from_parts(store: ConfigStore, config: Config, passphrase: Option<Passphrase>) -> Self {
        Self {
            store,
            config,
            passphrase,
        }
    }

    /// Read-only access to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Whether saves are encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.passphrase.is_some()
    }

    /// Write the configuration back, re-encrypting with the unlock passphrase.
    ///
    /// # Errors
    ///
    /// Returns an error if encryption or the atomic write fails.
    pub fn save(&self) -> Result<()> {
        self.store
            .save(&self.config, self.passphrase.as_ref().map(|p| p.as_str()))
    }

    /// Encrypt a plaintext configuration under `passphrase`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::AlreadyEncrypted` if already encrypted.
    pub fn encrypt(&mut self, passphrase: Passphrase) -> Result<()> {
        if self.is_encrypted() {
            return Err(ValidationError::AlreadyEncrypted.into());
        }
        self.store.save(&self.config, Some(passphrase.as_str()))?;
        self.passphrase = Some(passphrase);
        info!("configuration encrypted");
        Ok(())
    }

    /// Store the configuration as plaintext.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NotEncrypted` if already plaintext.
    pub fn decrypt(&mut self) -> Result<()> {
        if !self.is_encrypted() {
            return Err(ValidationError::NotEncrypted.into());
        }
        self.store.save(&self.config, None)?;
        self.passphrase = None;
        info!("configuration decrypted");
        Ok(())
    }

    /// Re-encrypt under a new passphrase in a single atomic write.
    ///
    /// The old passphrase stays in effect if the write fails.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NotEncrypted` if the configuration is
    /// plaintext.
    pub fn rotate_passphrase(&mut self, passphrase: Passphrase) -> Result<()> {
        if !self.is_encrypted() {
            return Err(ValidationError::NotEncrypted.into());
        }
        self.store.save(&self.config, Some(passphrase.as_str()))?;
        self.passphrase = Some(passphrase);
        info!("configuration passphrase changed");
        Ok(())
    }
}
