//! Core library components.
//!
//! Everything here is independent of the terminal: configuration model,
//! envelope encryption, the on-disk store, passphrase unlocking, the STS
//! client and the session cache. User interaction goes through
//! [`prompt::Prompter`].

pub mod cipher;
pub mod config;
pub mod constants;
pub mod legacy;
pub mod login;
pub mod prompt;
pub mod session;
pub mod store;
pub mod sts;
pub mod types;
pub mod unlock;
pub mod vault;
