// src/registry/document.rs

//! In-memory registry document and per-package records
//!
//! The document shape (an object whose `packages` key is an array of
//! objects) is validated once when it is deserialized. Keys this crate does
//! not know about, or known keys holding the wrong type, are carried through
//! untouched so that rewriting the registry never drops another tool's data.

use crate::error::{Error, Result};
use crate::state::{self, PackageState};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// One tracked package
///
/// Only string-valued `pkgname`, `version`, `pkgver` and `state` keys are
/// lifted into typed fields. A key of any other type stays in the raw
/// fields and is written back as it was read, so one malformed record never
/// makes the rest of the registry unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct PackageRecord {
    /// Empty when the stored record has no string `pkgname`
    pub pkgname: String,

    pub version: Option<String>,

    /// Canonical `name-version` string
    pub pkgver: Option<String>,

    // Only written through `set_state`, so it always holds a canonical token
    // unless it came from disk that way.
    state: Option<String>,

    extra: Map<String, Value>,
}

/// Remove `key` from `fields` if it holds a string
fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            fields.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

impl From<Map<String, Value>> for PackageRecord {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            pkgname: take_string(&mut fields, "pkgname").unwrap_or_default(),
            version: take_string(&mut fields, "version"),
            pkgver: take_string(&mut fields, "pkgver"),
            state: take_string(&mut fields, "state"),
            extra: fields,
        }
    }
}

impl From<PackageRecord> for Map<String, Value> {
    fn from(record: PackageRecord) -> Self {
        let mut fields = record.extra;
        if !record.pkgname.is_empty() {
            fields.insert("pkgname".to_string(), Value::String(record.pkgname));
        }
        let typed = [
            ("version", record.version),
            ("pkgver", record.pkgver),
            ("state", record.state),
        ];
        for (key, value) in typed {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::String(value));
            }
        }
        fields
    }
}

impl PackageRecord {
    /// Create a record with only its name set
    pub fn new(pkgname: impl Into<String>) -> Self {
        Self {
            pkgname: pkgname.into(),
            version: None,
            pkgver: None,
            state: None,
            extra: Map::new(),
        }
    }

    /// Raw state token as stored, if any
    pub fn state_token(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Decoded state; absent or unrecognized tokens give `Unknown`
    pub fn get_state(&self) -> PackageState {
        state::decode(self.state_token())
    }

    /// Overwrite the state field with the canonical token for `state`
    ///
    /// The field is left unchanged when `state` cannot be encoded.
    pub fn set_state(&mut self, state: PackageState) -> Result<()> {
        let token = state::encode(state)?;
        self.extra.remove("state");
        self.state = Some(token.to_string());

        debug!("{}: changed pkg state to '{}'", self.pkgname, token);
        Ok(())
    }
}

/// The whole registry file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    packages: Option<Vec<PackageRecord>>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RegistryDocument {
    /// A fresh document with an empty `packages` sequence
    pub fn new() -> Self {
        Self {
            packages: Some(Vec::new()),
            extra: Map::new(),
        }
    }

    /// Records in insertion order
    pub fn packages(&self) -> &[PackageRecord] {
        self.packages.as_deref().unwrap_or_default()
    }

    /// Whether the document has a `packages` sequence at all
    pub fn has_packages(&self) -> bool {
        self.packages.is_some()
    }

    /// First record named `name`
    pub fn find_by_name(&self, name: &str) -> Option<&PackageRecord> {
        if name.is_empty() {
            return None;
        }
        self.packages().iter().find(|pkg| pkg.pkgname == name)
    }

    /// Mutable access to the first record named `name`
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut PackageRecord> {
        if name.is_empty() {
            return None;
        }
        self.packages
            .as_mut()?
            .iter_mut()
            .find(|pkg| pkg.pkgname == name)
    }

    /// Append a record, creating the `packages` sequence if it is missing
    pub fn push(&mut self, record: PackageRecord) -> Result<()> {
        let packages = self.packages.get_or_insert_with(Vec::new);
        packages.try_reserve(1).map_err(|_| Error::OutOfMemory)?;
        packages.push(record);
        Ok(())
    }

    /// Take ownership of the record named `name`, dropping the rest
    pub fn into_record(self, name: &str) -> Option<PackageRecord> {
        if name.is_empty() {
            return None;
        }
        self.packages?.into_iter().find(|pkg| pkg.pkgname == name)
    }

    /// Take ownership of every record
    pub fn into_records(self) -> Vec<PackageRecord> {
        self.packages.unwrap_or_default()
    }
}
