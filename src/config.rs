// src/config.rs

//! Registry location configuration

use std::path::PathBuf;

/// Metadata directory, relative to the root directory
pub const META_PATH: &str = "var/db/pkgstate";

/// Registry file name inside the metadata directory
pub const REGISTRY_FILE: &str = "regpkgdb.json";

/// Context passed to every registry operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    rootdir: PathBuf,
}

impl Config {
    /// Configuration for the given root directory
    pub fn new(rootdir: impl Into<PathBuf>) -> Self {
        Self {
            rootdir: rootdir.into(),
        }
    }

    /// `<rootdir>/var/db/pkgstate`
    pub fn metadir(&self) -> PathBuf {
        self.rootdir.join(META_PATH)
    }

    /// `<rootdir>/var/db/pkgstate/regpkgdb.json`
    pub fn registry_path(&self) -> PathBuf {
        self.metadir().join(REGISTRY_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("/")
    }
}
