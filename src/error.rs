// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

// POSIX errno values used when reporting failures to the shell.
const ENOENT: i32 = 2;
const ENOMEM: i32 = 12;
const EINVAL: i32 = 22;

/// Core error types for pkgstate
#[derive(Error, Debug)]
pub enum Error {
    /// Allocation failure while building or growing the registry
    #[error("Out of memory")]
    OutOfMemory,

    /// State outside the canonical set, or a missing/unrecognized state
    /// where a valid one is required
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Package absent from the queried store
    #[error("Package not found: {0}")]
    NotFound(String),

    /// Directory creation or registry read/write failure
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build a filesystem error for `path`
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Translate into an OS-style error code
    ///
    /// Only meant for the outermost boundary (process exit status). Filesystem
    /// errors carry the underlying OS code when there is one; errors with no
    /// OS code (e.g. a malformed document) map to EINVAL.
    pub fn errno(&self) -> i32 {
        match self {
            Error::OutOfMemory => ENOMEM,
            Error::InvalidValue(_) => EINVAL,
            Error::NotFound(_) => ENOENT,
            Error::Filesystem { source, .. } => source.raw_os_error().unwrap_or(EINVAL),
        }
    }
}

/// Result type alias using pkgstate's Error type
pub type Result<T> = std::result::Result<T, Error>;
