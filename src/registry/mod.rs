// src/registry/mod.rs

//! Package state registry
//!
//! The registry is one document on disk holding a record per tracked
//! package. Every update is a full read-modify-write cycle:
//! - load the document, or start a fresh one if it cannot be read
//! - find the package's record, or create it
//! - set the new state
//! - make sure the metadata directory exists
//! - rewrite the whole document
//!
//! There is no locking. Two processes updating the same root at once can
//! lose one of the updates.

pub mod codec;
pub mod document;

pub use codec::{DocumentCodec, JsonCodec};
pub use document::{PackageRecord, RegistryDocument};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::filesystem::{self, METADIR_MODE};
use crate::query::InstalledStore;
use crate::state::PackageState;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read-modify-write access to the registry file under one root
#[derive(Debug, Clone)]
pub struct StateRegistry<C = JsonCodec> {
    config: Config,
    codec: C,
}

impl StateRegistry<JsonCodec> {
    /// Registry using the default (compressed JSON) codec
    pub fn new(config: Config) -> Self {
        Self::with_codec(config, JsonCodec::default())
    }
}

impl<C: DocumentCodec> StateRegistry<C> {
    pub fn with_codec(config: Config, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the registry document, or a fresh one if it cannot be read
    ///
    /// A missing file is the normal first-run case. A file that exists but
    /// fails to load is treated the same way, so the next write replaces it.
    pub fn load(&self) -> RegistryDocument {
        self.load_or_create(&self.config.registry_path())
    }

    fn load_or_create(&self, path: &Path) -> RegistryDocument {
        match filesystem::exists(path) {
            Ok(true) => {}
            Ok(false) => {
                debug!("No registry at {}, starting a new one", path.display());
                return RegistryDocument::new();
            }
            Err(e) => {
                warn!("Ignoring unreadable registry: {}", e);
                return RegistryDocument::new();
            }
        }

        match self.codec.load(path) {
            Ok(document) => document,
            Err(e) => {
                warn!("Ignoring unreadable registry: {}", e);
                RegistryDocument::new()
            }
        }
    }

    /// Record `state` for `pkgname` and persist the registry
    ///
    /// `version` and `pkgver` are only stored when the package is new to the
    /// registry; an existing record keeps its fields and only its state
    /// changes.
    pub fn apply(
        &self,
        pkgname: &str,
        version: Option<&str>,
        pkgver: Option<&str>,
        state: PackageState,
    ) -> Result<()> {
        if pkgname.is_empty() {
            return Err(Error::InvalidValue("empty package name".to_string()));
        }

        let metadir = self.config.metadir();
        let registry_path = self.config.registry_path();

        let mut document = self.load_or_create(&registry_path);

        match document.find_by_name_mut(pkgname) {
            Some(record) => record.set_state(state)?,
            None => {
                let mut record = PackageRecord::new(pkgname);
                record.version = version.map(str::to_owned);
                record.pkgver = pkgver.map(str::to_owned);
                record.set_state(state)?;
                document.push(record)?;
                debug!("Registered new package {}", pkgname);
            }
        }

        filesystem::ensure_dir(&metadir, METADIR_MODE)?;

        if let Err(e) = self.codec.save(&document, &registry_path) {
            warn!("Cannot write registry {}: {}", registry_path.display(), e);
            return Err(e);
        }

        info!("{}: state set to {}", pkgname, state);
        Ok(())
    }
}

impl<C: DocumentCodec> InstalledStore for StateRegistry<C> {
    fn find_installed(&self, pkgname: &str) -> Result<Option<PackageRecord>> {
        Ok(self.load().into_record(pkgname))
    }

    fn installed_records(&self) -> Result<Vec<PackageRecord>> {
        Ok(self.load().into_records())
    }
}
