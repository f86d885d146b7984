//! Small filesystem helpers.

use std::fs;
use std::io;
use std::path::Path;

/// Delete a regular file when present; a missing file is a no-op.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    if path.is_file() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Whether `path` exists and is a regular file.
pub fn is_file(path: &Path) -> bool {
    path.is_file()
}
