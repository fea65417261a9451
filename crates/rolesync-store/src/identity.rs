//! Role identity type
//!
//! A role is addressed everywhere by a `domain\name` string. Lookups are
//! case-insensitive, so the identity carries a lowercase normalized key
//! computed once at construction and compares/hashes through it.

use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator between the domain and name portions of a role identity.
pub const DOMAIN_SEPARATOR: char = '\\';

/// A case-insensitive role identifier of the form `domain\name`.
///
/// The domain portion is optional; an identity without a separator belongs
/// to the default (empty) domain. The original casing is preserved for
/// display, while equality, ordering, and hashing all go through the
/// lowercase normalized key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RoleIdentity {
    raw: String,
    key: String,
}

impl RoleIdentity {
    /// Create an identity from its `domain\name` string form.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let key = raw.to_lowercase();
        Self { raw, key }
    }

    /// The identity exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The lowercase normalized key used for comparisons.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The domain portion: everything before the first separator, or empty
    /// when the identity has no separator (default domain).
    pub fn domain(&self) -> &str {
        match self.raw.find(DOMAIN_SEPARATOR) {
            Some(idx) => &self.raw[..idx],
            None => "",
        }
    }

    /// The name portion: everything after the last separator.
    pub fn name(&self) -> &str {
        match self.raw.rfind(DOMAIN_SEPARATOR) {
            Some(idx) => &self.raw[idx + DOMAIN_SEPARATOR.len_utf8()..],
            None => &self.raw,
        }
    }
}

impl PartialEq for RoleIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RoleIdentity {}

impl Hash for RoleIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for RoleIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RoleIdentity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for RoleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for RoleIdentity {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for RoleIdentity {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for RoleIdentity {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<RoleIdentity> for String {
    fn from(identity: RoleIdentity) -> Self {
        identity.raw
    }
}
