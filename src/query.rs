// src/query.rs

//! Read-only state queries
//!
//! Unlike `PackageRecord::get_state`, which hands back `Unknown` for a
//! missing or unrecognized state, the strict queries here treat `Unknown` as
//! an `InvalidValue` error.

use crate::error::{Error, Result};
use crate::registry::PackageRecord;
use crate::state::PackageState;

/// Source of installed-package records
pub trait InstalledStore {
    /// Record for `pkgname`, or `None` if the package is not tracked
    fn find_installed(&self, pkgname: &str) -> Result<Option<PackageRecord>>;

    /// Every tracked record, in store order
    fn installed_records(&self) -> Result<Vec<PackageRecord>>;
}

/// One row of the installed-package listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub pkgname: String,
    pub pkgver: Option<String>,
    pub state: PackageState,
}

/// State of an installed package
///
/// Fails with `NotFound` if the store has no record for `pkgname`, and with
/// `InvalidValue` if the record's state is missing or unrecognized.
pub fn lookup_installed_state<S: InstalledStore + ?Sized>(
    store: &S,
    pkgname: &str,
) -> Result<PackageState> {
    let record = store
        .find_installed(pkgname)?
        .ok_or_else(|| Error::NotFound(pkgname.to_string()))?;

    get_state_from_record(&record)
}

/// Strict state read from an already loaded record
pub fn get_state_from_record(record: &PackageRecord) -> Result<PackageState> {
    match record.get_state() {
        PackageState::Unknown => Err(Error::InvalidValue(format!(
            "{}: missing or unrecognized state {:?}",
            record.pkgname,
            record.state_token()
        ))),
        state => Ok(state),
    }
}

/// Set the state on a record in memory; nothing is persisted
pub fn set_state_on_record(record: &mut PackageRecord, state: PackageState) -> Result<()> {
    record.set_state(state)
}

/// Every tracked package with its state
///
/// Records with an unrecognized state are listed as `Unknown` rather than
/// failing the whole listing. Records without a package name are skipped.
pub fn list_installed<S: InstalledStore + ?Sized>(store: &S) -> Result<Vec<InstalledPackage>> {
    let packages = store
        .installed_records()?
        .into_iter()
        .filter(|record| !record.pkgname.is_empty())
        .map(|record| InstalledPackage {
            state: record.get_state(),
            pkgname: record.pkgname,
            pkgver: record.pkgver,
        })
        .collect();

    Ok(packages)
}
