//! Sync run settings
//!
//! Typed view of the `sync.toml` configuration file:
//!
//! ```toml
//! remove_orphans = true
//!
//! [[include]]
//! domain = "sitecore"
//! pattern = "^Custom.*"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// One ordered inclusion rule for the predicate.
///
/// An absent (or blank) constraint matches anything: a rule with neither
/// constraint includes every role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncludeRule {
    /// Exact domain to match, case-insensitive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Regex the role name portion must fully match, case-insensitive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl IncludeRule {
    /// Rule constrained to a domain only.
    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            pattern: None,
        }
    }

    /// Rule constrained to a name pattern only.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            domain: None,
            pattern: Some(pattern.into()),
        }
    }

    /// Rule constrained to both a domain and a name pattern.
    pub fn domain_pattern(domain: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            pattern: Some(pattern.into()),
        }
    }
}

/// Settings for one sync run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Delete in-scope store roles absent from the serialized set
    #[serde(default)]
    pub remove_orphans: bool,

    /// Ordered inclusion rules; empty means include everything
    #[serde(default)]
    pub include: Vec<IncludeRule>,
}

impl SyncSettings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = toml::from_str(&fs::read_to_string(path)?)?;
        tracing::debug!(?path, "Loaded sync settings");
        Ok(settings)
    }
}
