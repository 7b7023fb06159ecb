//! Deleting temporary files during cleanup

use crate::paths::{host_temp_dir, is_within};
use std::fs;
use std::path::Path;
use tempguard_core::{Error, Result};

/// Delete the file at `path`, ignoring every error
///
/// Meant to be used as a cleanup action: it runs at exit or when a guard is
/// released, where nobody is left to handle a failure. Does not log.
pub fn safe_delete(path: impl AsRef<Path>) {
    let _ = fs::remove_file(path.as_ref());
}

/// Delete a file inside the host temporary directory and report what happened
///
/// Empty paths and paths outside the temporary directory are rejected
/// without touching the file system. Never panics.
pub fn try_remove(path: impl AsRef<Path>) -> Result<()> {
    try_remove_in(path, host_temp_dir()?)
}

/// Like [`try_remove`] with an explicit temporary directory
pub fn try_remove_in(path: impl AsRef<Path>, temp_dir: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let temp_dir = temp_dir.as_ref();

    if path.as_os_str().is_empty() {
        return Err(Error::invalid_path(path, "path cannot be empty"));
    }
    if !is_within(path, temp_dir) {
        return Err(Error::outside_temp_dir(path, temp_dir));
    }

    fs::remove_file(path).map_err(|e| Error::file_system(path, "remove temporary file", e))?;
    tracing::debug!(path = %path.display(), "removed temporary file");
    Ok(())
}
