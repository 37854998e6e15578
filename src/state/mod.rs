// src/state/mod.rs

//! Package lifecycle states and their canonical string tokens

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an installed package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageState {
    Unpacked,
    Installed,
    Broken,
    ConfigFiles,
    NotInstalled,
    HalfUnpacked,
    /// Sentinel for an absent or unrecognized token. Never persisted.
    Unknown,
}

impl PackageState {
    /// Every persistable state, in canonical order
    pub const ALL: [PackageState; 6] = [
        PackageState::Unpacked,
        PackageState::Installed,
        PackageState::Broken,
        PackageState::ConfigFiles,
        PackageState::NotInstalled,
        PackageState::HalfUnpacked,
    ];

    /// Canonical token for this state, or `None` for `Unknown`
    pub fn token(&self) -> Option<&'static str> {
        match self {
            PackageState::Unpacked => Some("unpacked"),
            PackageState::Installed => Some("installed"),
            PackageState::Broken => Some("broken"),
            PackageState::ConfigFiles => Some("config-files"),
            PackageState::NotInstalled => Some("not-installed"),
            PackageState::HalfUnpacked => Some("half-unpacked"),
            PackageState::Unknown => None,
        }
    }
}

/// Encode a state into its wire token
///
/// Fails with `InvalidValue` for `Unknown`, which has no token.
pub fn encode(state: PackageState) -> Result<&'static str> {
    state
        .token()
        .ok_or_else(|| Error::InvalidValue(format!("cannot encode package state {:?}", state)))
}

/// Decode a wire token into a state
///
/// Absent or unrecognized tokens yield `Unknown`; this never fails.
pub fn decode(token: Option<&str>) -> PackageState {
    let Some(token) = token else {
        return PackageState::Unknown;
    };

    PackageState::ALL
        .into_iter()
        .find(|state| state.token() == Some(token))
        .unwrap_or(PackageState::Unknown)
}

impl FromStr for PackageState {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match decode(Some(s)) {
            PackageState::Unknown => Err(Error::InvalidValue(format!("Invalid package state: {}", s))),
            state => Ok(state),
        }
    }
}

impl fmt::Display for PackageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().unwrap_or("unknown"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_all_states() {
        for state in PackageState::ALL {
            let token = encode(state).unwrap();
            assert_eq!(decode(Some(token)), state);
        }
    }

    #[test]
    fn test_canonical_tokens() {
        assert_eq!(encode(PackageState::Unpacked).unwrap(), "unpacked");
        assert_eq!(encode(PackageState::Installed).unwrap(), "installed");
        assert_eq!(encode(PackageState::Broken).unwrap(), "broken");
        assert_eq!(encode(PackageState::ConfigFiles).unwrap(), "config-files");
        assert_eq!(encode(PackageState::NotInstalled).unwrap(), "not-installed");
        assert_eq!(encode(PackageState::HalfUnpacked).unwrap(), "half-unpacked");
    }

    #[test]
    fn test_encode_unknown_fails() {
        let result = encode(PackageState::Unknown);
        assert!(matches!(result, Err(Error::InvalidValue(_))));
    }

    #[test]
    fn test_decode_unrecognized_is_unknown() {
        assert_eq!(decode(None), PackageState::Unknown);
        assert_eq!(decode(Some("")), PackageState::Unknown);
        assert_eq!(decode(Some("Installed")), PackageState::Unknown);
        assert_eq!(decode(Some("config_files")), PackageState::Unknown);
        assert_eq!(decode(Some("unknown")), PackageState::Unknown);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("broken".parse::<PackageState>().unwrap(), PackageState::Broken);
        assert!(matches!(
            "garbage".parse::<PackageState>(),
            Err(Error::InvalidValue(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(PackageState::HalfUnpacked.to_string(), "half-unpacked");
        assert_eq!(PackageState::Unknown.to_string(), "unknown");
    }
}
