//! Interactive input boundary.
//!
//! The core asks for typed values through [`Prompter`] and never renders
//! anything itself. Cancelling a prompt must surface as
//! `UnlockError::UserCancelled`.

use crate::core::types::Passphrase;
use crate::core::unlock::PassphraseSource;
use crate::error::Result;

/// Typed prompts the workflows need.
pub trait Prompter {
    /// Pick one of `items`, returning its index.
    fn select(&mut self, message: &str, items: &[String]) -> Result<usize>;

    /// Free text.
    fn text(&mut self, message: &str) -> Result<String>;

    /// A number in `min..=max`.
    fn number(&mut self, message: &str, default: u32, min: u32, max: u32) -> Result<u32>;

    /// An existing passphrase (hidden input).
    fn passphrase(&mut self, message: &str) -> Result<Passphrase>;

    /// A new passphrase, entered twice.
    fn new_passphrase(&mut self) -> Result<Passphrase>;

    /// Report a recoverable problem to the user.
    fn warn(&mut self, message: &str);
}

/// Feeds the unlock retry loop from a [`Prompter`].
pub struct Prompted<'a, P: ?Sized>(pub &'a mut P);

impl<P: Prompter + ?Sized> PassphraseSource for Prompted<'_, P> {
    fn passphrase(&mut self, _attempt: u32) -> Result<Passphrase> {
        self.0.passphrase("Configuration passphrase")
    }

    fn rejected(&mut self, _attempt: u32) {
        self.0.warn("wrong passphrase, try again");
    }
}
