//! Filesystem utilities.
//!
//! Helper functions for file operations and directory links.

use std::path::{Path, PathBuf};

use crate::error::{Result, SkillsError};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path).map_err(|err| SkillsError::fs(path, err))?;
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent(path: impl AsRef<Path>) -> Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Read a file to string, returning None if it doesn't exist.
pub fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(SkillsError::fs(path, err)),
    }
}

/// Overwrite a file with `content`, creating parent directories first.
pub fn write_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    std::fs::write(path, content).map_err(|err| SkillsError::fs(path, err))
}

/// Anchor a relative path at the current directory. Does not resolve symlinks.
pub fn absolute(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    std::path::absolute(path).map_err(|err| SkillsError::fs(path, err))
}

/// True if `path` itself is a symlink (or junction), without following it.
#[must_use]
pub fn is_link(path: &Path) -> bool {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => true,
        #[cfg(windows)]
        Ok(_) => junction::exists(path).unwrap_or(false),
        _ => false,
    }
}

/// Create a directory link at `link` pointing to `target`.
///
/// POSIX gets a plain symlink; Windows gets a junction.
pub fn create_dir_link(target: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }
    #[cfg(windows)]
    {
        junction::create(target, link)
    }
}

/// Remove a directory link without touching what it points to.
pub fn remove_link(link: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(link) {
        Ok(()) => Ok(()),
        // Junctions are removed as directories.
        #[cfg(windows)]
        Err(_) => std::fs::remove_dir(link),
        #[cfg(not(windows))]
        Err(err) => Err(err),
    }
}
