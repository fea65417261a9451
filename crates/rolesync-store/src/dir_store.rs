//! Directory-backed serialized role source
//!
//! Reads one `SerializedRole` per `*.toml` file in a flat directory. This
//! is the bundled source-of-truth backend: role files live under version
//! control and get synced into the live store.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::error::Error;
use crate::identity::RoleIdentity;
use crate::model::SerializedRole;
use crate::store::RoleDataStore;

/// A serialized role source reading `*.toml` files from a directory.
pub struct DirRoleDataStore {
    root: PathBuf,
}

impl DirRoleDataStore {
    /// Create a data store rooted at `root`.
    ///
    /// The directory does not need to exist yet; a missing directory reads
    /// as an empty role set.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory role files are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RoleDataStore for DirRoleDataStore {
    fn get_all(&self) -> Result<Vec<SerializedRole>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.root)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();

        // Sort by file name for deterministic iteration order
        paths.sort();

        let mut seen: HashSet<RoleIdentity> = HashSet::new();
        let mut roles = Vec::with_capacity(paths.len());

        for path in paths {
            let role: SerializedRole = toml::from_str(&fs::read_to_string(&path)?)?;
            if !seen.insert(role.role_name.clone()) {
                return Err(Error::DuplicateRole {
                    role: role.role_name.to_string(),
                    path,
                });
            }
            roles.push(role);
        }

        tracing::debug!(root = %self.root.display(), count = roles.len(), "Loaded serialized roles");
        Ok(roles)
    }
}
