//! Error types for credbroker.
//!
//! Every failure the core can produce maps to one variant below. Only
//! `main` decides how an error is presented and what the exit code is.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Unlock(#[from] UnlockError),

    #[error(transparent)]
    Sts(#[from] StsError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(String),

    #[error("configuration file already exists: {0}")]
    AlreadyExists(String),

    #[error("failed to read configuration: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to write configuration: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unable to determine home directory")]
    NoHomeDir,
}

/// Envelope encryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("malformed encrypted envelope: {0}")]
    MalformedEnvelope(String),

    #[error("wrong passphrase or corrupted configuration")]
    WrongPassphraseOrCorrupt,

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Passphrase entry errors.
#[derive(Error, Debug)]
pub enum UnlockError {
    #[error("cancelled by user")]
    UserCancelled,

    #[error("giving up after {0} failed passphrase attempt(s)")]
    AttemptsExhausted(u32),

    #[error("passphrases do not match")]
    Mismatch,

    #[error("passphrase cannot be empty")]
    EmptyPassphrase,
}

/// Role assumption and identity errors.
#[derive(Error, Debug)]
pub enum StsError {
    #[error("invalid ARN component: {0}")]
    InvalidArn(String),

    #[error("upstream rejected the profile credentials: {0}")]
    Unauthenticated(String),

    #[error("could not reach the identity service: {0}")]
    NetworkError(String),

    #[error("requested session duration exceeds the maximum allowed on role '{role}'")]
    DurationExceedsRoleLimit { role: String },

    #[error("wrong MFA code")]
    InvalidMfaCode,

    #[error("could not assume the selected role: {0}")]
    AccessDenied(String),

    #[error("provider error: {0}")]
    TransientProviderError(String),
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("configuration has no saved profiles")]
    NoProfiles,

    #[error("profile '{0}' has no saved environments")]
    NoEnvironments(String),

    #[error("environment '{0}' has no roles")]
    NoRoles(String),

    #[error("expected a number, got '{0}'")]
    InvalidNumber(String),

    #[error("session duration must be between {min} and {max} hours, got {got}")]
    InvalidDuration { got: u32, min: u32, max: u32 },

    #[error("configuration is already encrypted")]
    AlreadyEncrypted,

    #[error("configuration is not encrypted")]
    NotEncrypted,

    #[error("{0} requires an interactive terminal")]
    NotInteractive(&'static str),
}

impl Error {
    /// Whether this error is a user-initiated cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Unlock(UnlockError::UserCancelled))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
