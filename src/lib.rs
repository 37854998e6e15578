// src/lib.rs

//! pkgstate: package installation state registry
//!
//! Tracks a small lifecycle state for every installed package and keeps it
//! in one registry document under the target root.
//!
//! # Architecture
//!
//! - State codec: closed set of states with stable string tokens
//! - Registry document: typed records, unknown keys preserved on rewrite
//! - State registry: load, mutate, rewrite the whole document per update
//! - Queries: strict reads that reject unknown states, plus listing
//! - Explicit configuration: the root directory is passed in, never global

pub mod config;
mod error;
pub mod filesystem;
pub mod query;
pub mod registry;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use query::{InstalledStore, lookup_installed_state};
pub use registry::{PackageRecord, RegistryDocument, StateRegistry};
pub use state::PackageState;
