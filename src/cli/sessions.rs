//! Sessions command - list cached sessions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::prompt::TerminalPrompter;
use crate::cli::{open_vault, output, Settings};
use crate::core::config::Session;
use crate::error::Result;

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    region: &'a str,
    expiry: DateTime<Utc>,
    expired: bool,
}

impl<'a> Entry<'a> {
    fn new(session: &'a Session, now: DateTime<Utc>) -> Self {
        Self {
            name: &session.name,
            region: &session.region,
            expiry: session.expiry,
            expired: session.is_expired_at(now),
        }
    }
}

/// Print cached sessions. Never writes the configuration.
pub fn execute(json: bool, settings: &Settings) -> Result<()> {
    let mut prompter = TerminalPrompter::new();
    let vault = open_vault(settings, &mut prompter)?;
    let now = Utc::now();
    let entries: Vec<Entry> = vault
        .config()
        .sessions
        .iter()
        .map(|s| Entry::new(s, now))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output::dimmed("no cached sessions");
        return Ok(());
    }

    output::section("Sessions");
    for entry in &entries {
        let status = if entry.expired { "expired" } else { "valid" };
        println!(
            "  {}  {}  {}  {}",
            entry.name,
            entry.region,
            entry.expiry.format("%Y-%m-%d %H:%M:%S UTC"),
            status
        );
    }
    Ok(())
}
