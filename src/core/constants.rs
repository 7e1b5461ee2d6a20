//! Constants used throughout credbroker.
//!
//! Centralizes magic strings and tuning values.

/// Directory under HOME holding the configuration (`~/.credbroker`).
pub const CONFIG_DIR: &str = ".credbroker";

/// Configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Version marker identifying an encrypted envelope on disk.
pub const ENVELOPE_V1: &str = "credbroker-envelope-v1";

/// KDF identifier recorded in every envelope.
pub const KDF_ARGON2ID: &str = "argon2id";

/// Separator joining profile, environment and role into a session name.
pub const SESSION_NAME_SEPARATOR: &str = "/";

/// Salt length for key derivation, in bytes.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length, in bytes.
pub const NONCE_LEN: usize = 12;

/// Derived key length, in bytes.
pub const KEY_LEN: usize = 32;

/// Argon2id memory cost in KiB (OWASP minimum profile).
pub const ARGON2_MEMORY_KIB: u32 = 19 * 1024;

/// Argon2id iteration count.
pub const ARGON2_ITERATIONS: u32 = 2;

/// Argon2id lanes.
pub const ARGON2_PARALLELISM: u32 = 1;

/// Upper bound accepted for an envelope's memory cost (1 GiB).
pub const ARGON2_MAX_MEMORY_KIB: u32 = 1024 * 1024;

/// Upper bound accepted for an envelope's iteration count.
pub const ARGON2_MAX_ITERATIONS: u32 = 64;

/// Session duration bounds offered at the prompt, in hours.
pub const MIN_SESSION_HOURS: u32 = 1;
pub const MAX_SESSION_HOURS: u32 = 12;
pub const DEFAULT_SESSION_HOURS: u32 = 1;

/// Default STS operation timeout, in seconds.
pub const DEFAULT_STS_TIMEOUT_SECS: u64 = 30;

/// Region used for STS calls when neither profile nor environment names one.
pub const DEFAULT_STS_REGION: &str = "us-east-1";

/// Maximum length STS accepts for a role session name.
pub const MAX_ROLE_SESSION_NAME: usize = 64;
