//! Session cache semantics.
//!
//! Sessions are keyed by their composite `profile/environment/role` name.
//! Inserting a session whose name is already cached replaces the old entry
//! at the same position; otherwise it is appended.

use tracing::debug;

use crate::core::config::Session;
use crate::core::sts::TemporaryCredentials;

/// Insert or replace `session`, returning the updated list.
pub fn upsert(mut sessions: Vec<Session>, session: Session) -> Vec<Session> {
    match sessions.iter().position(|s| s.name == session.name) {
        Some(idx) => {
            debug!(name = %session.name, index = idx, "replacing cached session");
            sessions[idx] = session;
        }
        None => {
            debug!(name = %session.name, "caching new session");
            sessions.push(session);
        }
    }
    sessions
}

impl Session {
    /// Build a session from freshly issued credentials.
    pub fn from_credentials(
        profile: &str,
        environment: &str,
        role: &str,
        region: &str,
        credentials: TemporaryCredentials,
    ) -> Self {
        Self {
            name: Session::composite_name(profile, environment, role),
            region: region.to_string(),
            access_key_id: credentials.access_key_id,
            secret_access_key: credentials.secret_access_key,
            session_token: credentials.session_token,
            expiry: credentials.expiration,
        }
    }
}
