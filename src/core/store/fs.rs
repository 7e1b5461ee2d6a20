//! Filesystem helpers for the configuration file.
//!
//! Writes go to a temporary file in the target's directory which is synced
//! and then renamed over the target, so readers only ever see the old file
//! or the complete new one.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

/// Expected permissions on the configuration file (Unix only).
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Atomically replace `path` with whatever `fill` writes.
///
/// If `fill` fails, or the process dies before the rename, the previous
/// file at `path` is left untouched and the temporary file is removed.
pub(crate) fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(ConfigError::WriteFile)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(ConfigError::WriteFile)?;
    fill(tmp.as_file_mut()).map_err(ConfigError::WriteFile)?;
    tmp.as_file_mut().flush().map_err(ConfigError::WriteFile)?;
    tmp.as_file().sync_all().map_err(ConfigError::WriteFile)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(FILE_MODE))
            .map_err(ConfigError::WriteFile)?;
    }

    tmp.persist(path)
        .map_err(|e| ConfigError::WriteFile(e.error))?;
    debug!(path = %path.display(), "configuration written");
    Ok(())
}

/// Warn when the configuration file is readable by other users.
#[cfg(unix)]
pub(crate) fn check_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let Ok(metadata) = fs::metadata(path) else {
        return;
    };
    let mode = metadata.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        warn!(
            path = %path.display(),
            mode = %format!("{:o}", mode),
            "configuration file is accessible by other users"
        );
    }
}

#[cfg(not(unix))]
pub(crate) fn check_permissions(_path: &Path) {}
