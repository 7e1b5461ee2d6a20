//! Init command - create an empty configuration.

use tracing::info;

use crate::cli::{output, Settings};
use crate::error::Result;

/// Write an empty plaintext configuration, refusing to overwrite.
pub fn execute(settings: &Settings) -> Result<()> {
    let store = settings.store();
    store.init()?;
    info!(path = %store.path().display(), "initialized configuration");

    output::success(&format!("created {}", output::path(store.path().display())));
    output::hint("add a [[profiles]] entry, then run: credbroker login");
    Ok(())
}
