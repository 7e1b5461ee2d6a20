//! Configuration model.
//!
//! The configuration holds the user's long-lived profiles and the cache of
//! short-lived sessions minted from them. It is persisted as TOML, either
//! directly or inside an encrypted envelope (see [`crate::core::store`]).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::types::{AccountId, RoleName, SessionName};
use crate::error::{ConfigError, Result};

/// Top-level persisted configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Saved profiles, in menu order.
    #[serde(default)]
    pub profiles: Vec<Profile>,
    /// Cached sessions, at most one per composite name.
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// A set of long-lived credentials and the environments reachable with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub credentials: ProfileCredentials,
    #[serde(default)]
    pub environments: Vec<Environment>,
}

/// Long-lived access key pair for the hub account user.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Region used for identity and STS calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl fmt::Debug for ProfileCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[redacted]")
            .field("region", &self.region)
            .finish()
    }
}

/// A target account the profile can assume roles in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub account_id: AccountId,
    pub region: String,
    #[serde(default)]
    pub roles: Vec<RoleName>,
}

/// A cached short-lived session.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Composite `profile/environment/role` key.
    pub name: SessionName,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiry: DateTime<Utc>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[redacted]")
            .field("session_token", &"[redacted]")
            .field("expiry", &self.expiry)
            .finish()
    }
}

impl Session {
    /// Build the composite session name.
    pub fn composite_name(profile: &str, environment: &str, role: &str) -> SessionName {
        [profile, environment, role].join(constants::SESSION_NAME_SEPARATOR)
    }

    /// Whether the session has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        debug!(
            profiles = config.profiles.len(),
            sessions = config.sessions.len(),
            "config parsed"
        );
        Ok(config)
    }

    /// Serialize the configuration to TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::Serialize)?)
    }
}
