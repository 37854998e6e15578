// src/filesystem/mod.rs

//! Filesystem helpers for the registry's metadata directory

use crate::error::{Error, Result};
use std::fs::DirBuilder;
use std::io;
use std::path::Path;
use tracing::debug;

#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;

/// Permissions for newly created metadata directories
pub const METADIR_MODE: u32 = 0o755;

/// Whether anything exists at `path`
///
/// Only a missing entry counts as `false`; any other `stat` failure (for
/// example EACCES) is returned as an error.
pub fn exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|e| Error::filesystem(path, e))
}

/// Create `path` and any missing parents
///
/// A directory that already exists is not an error. Every other failure is
/// returned as `Error::Filesystem` with the OS error attached.
pub fn ensure_dir(path: &Path, mode: u32) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    match builder.create(path) {
        Ok(()) => {
            debug!("Created directory {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => {
            debug!("Failed to create directory {}: {}", path.display(), e);
            Err(Error::filesystem(path, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("var/db/pkgstate");

        ensure_dir(&path, METADIR_MODE).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_ensure_dir_existing_is_ok() {
        let temp_dir = tempfile::tempdir().unwrap();

        ensure_dir(temp_dir.path(), METADIR_MODE).unwrap();
        ensure_dir(temp_dir.path(), METADIR_MODE).unwrap();
    }

    #[test]
    fn test_ensure_dir_under_file_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("blocker");
        fs::write(&file, b"").unwrap();

        let result = ensure_dir(&file.join("sub"), METADIR_MODE);
        assert!(matches!(result, Err(Error::Filesystem { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dir_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("meta");

        ensure_dir(&path, 0o700).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn test_exists() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(exists(temp_dir.path()).unwrap());
        assert!(!exists(&temp_dir.path().join("missing")).unwrap());
    }

    #[test]
    fn test_exists_reports_stat_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("blocker");
        fs::write(&file, b"").unwrap();

        // ENOTDIR is not "missing", so it must not read as `false`
        let result = exists(&file.join("regpkgdb.json"));
        assert!(matches!(result, Err(Error::Filesystem { .. })));
    }
}
