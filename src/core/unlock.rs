//! Passphrase retry loop for encrypted configurations.
//!
//! ```text
//! AwaitingPassphrase ──► Decrypting ──► Success
//!        ▲                   │
//!        └──── Retry ◄───────┤ wrong passphrase
//!                            └──► Abort (cancelled / attempts exhausted)
//! ```
//!
//! The loop is unbounded by default. A maximum can be injected for
//! non-interactive use.

use std::num::NonZeroU32;

use tracing::{debug, warn};

use crate::core::cipher::{Codec, Envelope};
use crate::core::config::Config;
use crate::core::types::Passphrase;
use crate::error::{CipherError, Error, Result, UnlockError};

/// Supplies passphrases to the retry loop.
pub trait PassphraseSource {
    /// Ask for a passphrase. `attempt` starts at 1.
    ///
    /// Return `UnlockError::UserCancelled` to abort the loop.
    fn passphrase(&mut self, attempt: u32) -> Result<Passphrase>;

    /// Called after a passphrase failed to decrypt the envelope.
    fn rejected(&mut self, _attempt: u32) {}
}

/// A decrypted configuration together with the passphrase that opened it.
pub struct Unlocked {
    pub config: Config,
    pub passphrase: Passphrase,
    pub attempts: u32,
}

impl std::fmt::Debug for Unlocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unlocked")
            .field("config", &self.config)
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}

/// Bounded or unbounded passphrase retry gate.
#[derive(Debug, Clone, Default)]
pub struct RetryGate {
    max_attempts: Option<NonZeroU32>,
}

impl RetryGate {
    /// Gate that keeps asking until success or cancellation.
    pub fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    /// Gate from an optional limit, where `None` or `0` means unbounded.
    pub fn from_limit(limit: Option<u32>) -> Self {
        Self {
            max_attempts: limit.and_then(NonZeroU32::new),
        }
    }

    /// Configured maximum, if any.
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts.map(NonZeroU32::get)
    }

    /// Decrypt `envelope`, asking `source` for passphrases until one works.
    ///
    /// # Errors
    ///
    /// - `UnlockError::UserCancelled` if the source cancels.
    /// - `UnlockError::AttemptsExhausted` if the maximum is reached.
    /// - `CipherError::MalformedEnvelope` immediately, without retrying.
    /// - `ConfigError::Parse` if the decrypted text is not a configuration.
    pub fn unlock(
        &self,
        codec: &Codec,
        envelope: &Envelope,
        source: &mut dyn PassphraseSource,
    ) -> Result<Unlocked> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let passphrase = source.passphrase(attempt)?;

            match codec.decrypt(envelope, &passphrase) {
                Ok(plaintext) => {
                    debug!(attempt, "config unlocked");
                    let text = std::str::from_utf8(&plaintext).map_err(|e| {
                        CipherError::MalformedEnvelope(format!("plaintext is not UTF-8: {}", e))
                    })?;
                    let config = Config::from_toml(text)?;
                    return Ok(Unlocked {
                        config,
                        passphrase,
                        attempts: attempt,
                    });
                }
                Err(Error::Cipher(CipherError::WrongPassphraseOrCorrupt)) => {
                    warn!(attempt, "passphrase rejected");
                    source.rejected(attempt);
                    if let Some(max) = self.max_attempts {
                        if attempt >= max.get() {
                            return Err(UnlockError::AttemptsExhausted(attempt).into());
                        }
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Passphrases supplied up front, for headless use and tests.
#[derive(Default)]
pub struct FixedPassphrases {
    queue: std::collections::VecDeque<Passphrase>,
    rejected: u32,
}

impl std::fmt::Debug for FixedPassphrases {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedPassphrases")
            .field("remaining", &self.queue.len())
            .field("rejected", &self.rejected)
            .finish()
    }
}

impl FixedPassphrases {
    /// Source that hands out `passphrases` in order, then cancels.
    pub fn new<I, S>(passphrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: passphrases
                .into_iter()
                .map(|p| Passphrase::new(p.into()))
                .collect(),
            rejected: 0,
        }
    }

    /// Number of passphrases reported as rejected.
    pub fn rejected_count(&self) -> u32 {
        self.rejected
    }
}

impl PassphraseSource for FixedPassphrases {
    fn passphrase(&mut self, _attempt: u32) -> Result<Passphrase> {
        self.queue
            .pop_front()
            .ok_or_else(|| UnlockError::UserCancelled.into())
    }

    fn rejected(&mut self, _attempt: u32) {
        self.rejected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cipher::KdfParams;

    fn codec() -> Codec {
        Codec::new(KdfParams::argon2id(1024, 1, 1))
    }

    fn locked(passphrase: &str) -> Envelope {
        let config = Config::new().to_toml().unwrap();
        codec().encrypt(config.as_bytes(), passphrase).unwrap()
    }

    #[test]
    fn test_first_attempt_succeeds() {
        let mut source = FixedPassphrases::new(["right"]);
        let unlocked = RetryGate::unbounded()
            .unlock(&codec(), &locked("right"), &mut source)
            .unwrap();

        assert_eq!(unlocked.attempts, 1);
        assert_eq!(unlocked.passphrase.as_str(), "right");
        assert_eq!(source.rejected_count(), 0);
    }

    #[test]
    fn test_third_attempt_succeeds() {
        let mut source = FixedPassphrases::new(["nope", "still nope", "right"]);
        let unlocked = RetryGate::unbounded()
            .unlock(&codec(), &locked("right"), &mut source)
            .unwrap();

        assert_eq!(unlocked.attempts, 3);
        assert_eq!(unlocked.passphrase.as_str(), "right");
        assert_eq!(source.rejected_count(), 2);
    }

    #[test]
    fn test_cancel_aborts() {
        let mut source = FixedPassphrases::new(["nope"]);
        let err = RetryGate::unbounded()
            .unlock(&codec(), &locked("right"), &mut source)
            .unwrap_err();

        assert!(err.is_cancelled());
    }

    #[test]
    fn test_max_attempts_is_enforced() {
        let mut source = FixedPassphrases::new(["a", "b", "c", "right"]);
        let gate = RetryGate::from_limit(Some(2));
        let err = gate.unlock(&codec(), &locked("right"), &mut source).unwrap_err();

        assert!(matches!(
            err,
            Error::Unlock(UnlockError::AttemptsExhausted(2))
        ));
        assert_eq!(source.rejected_count(), 2);
    }

    #[test]
    fn test_zero_limit_means_unbounded() {
        assert_eq!(RetryGate::from_limit(Some(0)).max_attempts(), None);
        assert_eq!(RetryGate::from_limit(None).max_attempts(), None);
        assert_eq!(RetryGate::from_limit(Some(3)).max_attempts(), Some(3));
    }

    #[test]
    fn test_malformed_envelope_is_not_retried() {
        let good = locked("right");
        let broken = Envelope::new(
            good.kdf.clone(),
            &good.salt().unwrap(),
            &[0u8; 3],
            &good.ciphertext().unwrap(),
        );
        let mut source = FixedPassphrases::new(["right", "right"]);
        let err = RetryGate::unbounded()
            .unlock(&codec(), &broken, &mut source)
            .unwrap_err();

        assert!(matches!(err, Error::Cipher(CipherError::MalformedEnvelope(_))));
        assert_eq!(source.rejected_count(), 0);
    }
}
