//! TOML-file-backed role store
//!
//! The whole store is one TOML document of `[[role]]` entries. Mutations
//! persist immediately; inside a sync bracket persistence is suspended and
//! flushed once at `end_sync`, so a bulk run writes the file a single time.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::identity::RoleIdentity;
use crate::memory::MemoryRoleStore;
use crate::store::RoleStore;

/// One `[[role]]` entry in the store document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoleEntry {
    name: RoleIdentity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    member_of: Vec<RoleIdentity>,
}

/// The on-disk shape of the store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RoleDocument {
    #[serde(default, rename = "role")]
    roles: Vec<RoleEntry>,
}

/// A role store persisted as a single TOML file.
pub struct FileRoleStore {
    path: PathBuf,
    inner: MemoryRoleStore,
    /// Persistence deferred while a sync bracket is open
    in_sync: bool,
    dirty: bool,
}

impl FileRoleStore {
    /// Open a file store, loading the document if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut inner = MemoryRoleStore::new();

        if path.exists() {
            let document: RoleDocument = toml::from_str(&fs::read_to_string(&path)?)?;
            for entry in document.roles {
                inner.insert_role(entry.name, entry.member_of);
            }
        }

        Ok(Self {
            path,
            inner,
            in_sync: false,
            dirty: false,
        })
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mark_changed(&mut self) -> Result<()> {
        if self.in_sync {
            self.dirty = true;
            return Ok(());
        }
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let mut roles = self.inner.all_roles()?;
        roles.sort();

        let mut document = RoleDocument::default();
        for role in roles {
            let mut member_of: Vec<RoleIdentity> =
                self.inner.member_of_roles(&role)?.into_iter().collect();
            member_of.sort();
            document.roles.push(RoleEntry {
                name: role,
                member_of,
            });
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, toml::to_string_pretty(&document)?)?;
        self.dirty = false;
        Ok(())
    }
}

impl RoleStore for FileRoleStore {
    fn exists(&self, role: &RoleIdentity) -> Result<bool> {
        self.inner.exists(role)
    }

    fn create(&mut self, role: &RoleIdentity) -> Result<()> {
        self.inner.create(role)?;
        self.mark_changed()
    }

    fn delete(&mut self, role: &RoleIdentity) -> Result<()> {
        self.inner.delete(role)?;
        self.mark_changed()
    }

    fn member_of_roles(&self, role: &RoleIdentity) -> Result<HashSet<RoleIdentity>> {
        self.inner.member_of_roles(role)
    }

    fn is_member_of(&self, role: &RoleIdentity, parent: &RoleIdentity) -> Result<bool> {
        self.inner.is_member_of(role, parent)
    }

    fn add_membership(&mut self, role: &RoleIdentity, parent: &RoleIdentity) -> Result<()> {
        self.inner.add_membership(role, parent)?;
        self.mark_changed()
    }

    fn remove_membership(&mut self, role: &RoleIdentity, parent: &RoleIdentity) -> Result<()> {
        self.inner.remove_membership(role, parent)?;
        self.mark_changed()
    }

    fn all_roles(&self) -> Result<Vec<RoleIdentity>> {
        self.inner.all_roles()
    }

    fn begin_sync(&mut self) {
        tracing::debug!(path = %self.path.display(), "Suspending per-mutation persistence");
        self.in_sync = true;
    }

    fn end_sync(&mut self) -> Result<()> {
        self.in_sync = false;
        if self.dirty {
            tracing::debug!(path = %self.path.display(), "Flushing deferred persistence");
            self.persist()?;
        }
        Ok(())
    }
}
