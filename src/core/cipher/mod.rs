//! Passphrase-based encryption of the configuration blob.
//!
//! A 256-bit key is derived from the passphrase with Argon2id and a random
//! salt, then the plaintext is sealed with AES-256-GCM under a random nonce.
//! Salt, nonce and KDF parameters travel in the [`Envelope`], so the same
//! passphrase re-derives the same key later without anything else stored.
//!
//! Decryption is all-or-nothing: a wrong passphrase and a tampered envelope
//! both fail the GCM tag check and surface as
//! `CipherError::WrongPassphraseOrCorrupt`.

mod envelope;

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{CipherError, Result};

pub use envelope::{Envelope, KdfParams};

/// Derive a 32-byte key from a passphrase and salt.
///
/// Deterministic for the same passphrase, salt and parameters.
///
/// # Errors
///
/// Returns `CipherError::KeyDerivation` if the parameters are rejected by
/// Argon2 (for example a salt shorter than eight bytes).
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; constants::KEY_LEN]>> {
    let argon_params = argon2::Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(constants::KEY_LEN),
    )
    .map_err(|e| CipherError::KeyDerivation(format!("invalid Argon2id parameters: {e}")))?;

    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon_params,
    );

    let mut key = Zeroizing::new([0u8; constants::KEY_LEN]);
    argon2
        .hash_password_into(passphrase, salt, &mut key[..])
        .map_err(|e| CipherError::KeyDerivation(format!("Argon2id failed: {e}")))?;

    Ok(key)
}

/// Envelope codec bound to a set of key derivation parameters.
///
/// The parameters only apply to encryption; decryption always uses the
/// parameters recorded in the envelope being opened.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    params: KdfParams,
}

impl Codec {
    /// Create a codec that encrypts with the given parameters.
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    /// Encrypt plaintext under a passphrase.
    ///
    /// Salt and nonce are freshly random on every call, so encrypting the
    /// same plaintext twice yields different envelopes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyDerivation` or `CipherError::EncryptionFailed`.
    pub fn encrypt(&self, plaintext: &[u8], passphrase: &str) -> Result<Envelope> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let mut salt = [0u8; constants::SALT_LEN];
        let mut nonce = [0u8; constants::NONCE_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut nonce);

        let key = derive_key(passphrase.as_bytes(), &salt, &self.params)?;
        let cipher = Aes256Gcm::new_from_slice(&key[..])
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        let ciphertext = cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: plaintext,
                    aad: constants::ENVELOPE_V1.as_bytes(),
                },
            )
            .map_err(|_| CipherError::EncryptionFailed("AES-GCM seal failed".to_string()))?;

        trace!(ciphertext_len = ciphertext.len(), "encrypted");
        Ok(Envelope::new(self.params.clone(), &salt, &nonce, &ciphertext))
    }

    /// Decrypt an envelope with a passphrase.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::MalformedEnvelope` if a structural field is
    /// invalid, or `CipherError::WrongPassphraseOrCorrupt` if authentication
    /// fails. No plaintext is returned in either case.
    pub fn decrypt(&self, envelope: &Envelope, passphrase: &str) -> Result<Zeroizing<Vec<u8>>> {
        envelope.kdf.validate()?;
        let salt = envelope.salt()?;
        let nonce = envelope.nonce()?;
        let ciphertext = envelope.ciphertext()?;
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let key = derive_key(passphrase.as_bytes(), &salt, &envelope.kdf)?;
        let cipher = Aes256Gcm::new_from_slice(&key[..])
            .map_err(|e| CipherError::KeyDerivation(e.to_string()))?;

        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &ciphertext,
                    aad: constants::ENVELOPE_V1.as_bytes(),
                },
            )
            .map_err(|_| CipherError::WrongPassphraseOrCorrupt)?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(Zeroizing::new(plaintext))
    }
}
