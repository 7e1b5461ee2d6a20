//! credbroker - local broker for short-lived cloud credentials.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Create an empty configuration
//! │   ├── login         # Assume a role and cache the session
//! │   ├── crypto        # Encrypt, decrypt, change passphrase
//! │   ├── sessions      # List cached sessions
//! │   ├── prompt        # Terminal Prompter
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Profiles, environments, sessions
//!     ├── cipher/       # Argon2id + AES-256-GCM envelope
//!     ├── store/        # Atomic config file storage
//!     ├── unlock        # Passphrase retry gate
//!     ├── vault         # Opened configuration
//!     ├── sts/          # Role assumption client
//!     ├── session       # Session cache upsert
//!     ├── login         # Login workflow
//!     └── legacy        # ~/.aws credentials projection
//! ```
//!
//! # Features
//!
//! - Passphrase-encrypted configuration with unlimited or bounded retries
//! - MFA-backed role assumption with per-role session caching
//! - Crash-safe writes: the previous file survives a failed save

pub mod cli;
pub mod core;
pub mod error;
