//! Encrypted envelope format.
//!
//! The envelope is a small JSON document carrying everything needed to
//! re-derive the key from a passphrase: the KDF parameters, salt and nonce,
//! alongside the AES-GCM ciphertext (tag included). Plaintext configuration
//! is TOML and can never begin with `{`, so the two are told apart without
//! a passphrase.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::core::constants;
use crate::error::{CipherError, Result};

/// Key derivation parameters recorded in each envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub algorithm: String,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            algorithm: constants::KDF_ARGON2ID.to_string(),
            memory_kib: constants::ARGON2_MEMORY_KIB,
            iterations: constants::ARGON2_ITERATIONS,
            parallelism: constants::ARGON2_PARALLELISM,
        }
    }
}

impl KdfParams {
    /// Argon2id parameters with explicit costs.
    pub fn argon2id(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            algorithm: constants::KDF_ARGON2ID.to_string(),
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Reject unknown algorithms and costs outside the accepted range.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::MalformedEnvelope` when a parameter is unusable.
    pub fn validate(&self) -> Result<()> {
        if self.algorithm != constants::KDF_ARGON2ID {
            return Err(malformed(format!("unsupported kdf '{}'", self.algorithm)));
        }
        if self.memory_kib == 0 || self.memory_kib > constants::ARGON2_MAX_MEMORY_KIB {
            return Err(malformed(format!(
                "memory cost out of range: {}",
                self.memory_kib
            )));
        }
        if self.iterations == 0 || self.iterations > constants::ARGON2_MAX_ITERATIONS {
            return Err(malformed(format!(
                "iteration count out of range: {}",
                self.iterations
            )));
        }
        if self.parallelism == 0 || self.parallelism > 16 {
            return Err(malformed(format!(
                "parallelism out of range: {}",
                self.parallelism
            )));
        }
        Ok(())
    }
}

/// Encrypted configuration as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    version: String,
    pub kdf: KdfParams,
    salt: String,
    nonce: String,
    ciphertext: String,
}

impl Envelope {
    /// Assemble an envelope from raw parts.
    pub fn new(kdf: KdfParams, salt: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            version: constants::ENVELOPE_V1.to_string(),
            kdf,
            salt: STANDARD.encode(salt),
            nonce: STANDARD.encode(nonce),
            ciphertext: STANDARD.encode(ciphertext),
        }
    }

    /// Serialize the envelope to a JSON string.
    pub fn seal(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self).map_err(|e| {
            CipherError::EncryptionFailed(format!("failed to serialize envelope: {}", e))
        })?;
        out.push('\n');
        Ok(out)
    }

    /// Parse an envelope from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::MalformedEnvelope` if the text is not a
    /// well-formed envelope of a known version.
    pub fn parse(contents: &str) -> Result<Self> {
        let envelope: Self = serde_json::from_str(contents)
            .map_err(|e| malformed(format!("invalid envelope document: {}", e)))?;
        if envelope.version != constants::ENVELOPE_V1 {
            return Err(malformed(format!(
                "unknown envelope version '{}'",
                envelope.version
            )));
        }
        envelope.kdf.validate()?;
        Ok(envelope)
    }

    /// Check whether file contents look like an envelope.
    ///
    /// A configuration document never opens with `{`, so anything that does
    /// is treated as an envelope and left to [`Envelope::parse`] to validate.
    pub fn is_envelope(contents: &str) -> bool {
        contents.trim_start().starts_with('{')
    }

    /// Decoded salt.
    pub fn salt(&self) -> Result<[u8; constants::SALT_LEN]> {
        decode_fixed(&self.salt, "salt")
    }

    /// Decoded nonce.
    pub fn nonce(&self) -> Result<[u8; constants::NONCE_LEN]> {
        decode_fixed(&self.nonce, "nonce")
    }

    /// Decoded ciphertext, authentication tag included.
    pub fn ciphertext(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.ciphertext)
            .map_err(|e| malformed(format!("ciphertext is not base64: {}", e)))
    }
}

fn decode_fixed<const N: usize>(encoded: &str, field: &str) -> Result<[u8; N]> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| malformed(format!("{} is not base64: {}", field, e)))?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| malformed(format!("{} must be {} bytes, got {}", field, N, v.len())))
}

fn malformed(reason: String) -> crate::error::Error {
    CipherError::MalformedEnvelope(reason).into()
}
