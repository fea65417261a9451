//! In-memory role store
//!
//! Backs the file store and most tests. Roles map to their direct parent
//! sets; identities hash case-insensitively, so no extra normalization is
//! needed here.

use std::collections::{HashMap, HashSet};

use crate::identity::RoleIdentity;
use crate::store::RoleStore;
use crate::{Error, Result};

/// A role store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoleStore {
    roles: HashMap<RoleIdentity, HashSet<RoleIdentity>>,
}

impl MemoryRoleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a role and its direct parents, creating missing parents too.
    ///
    /// Intended for tests and store bootstrapping; unlike the trait
    /// operations this never fails.
    pub fn insert_role(&mut self, role: impl Into<RoleIdentity>, parents: Vec<RoleIdentity>) {
        let role = role.into();
        for parent in &parents {
            self.roles.entry(parent.clone()).or_default();
        }
        self.roles
            .entry(role)
            .or_default()
            .extend(parents);
    }

    /// Number of roles in the store.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the store has no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl RoleStore for MemoryRoleStore {
    fn exists(&self, role: &RoleIdentity) -> Result<bool> {
        Ok(self.roles.contains_key(role))
    }

    fn create(&mut self, role: &RoleIdentity) -> Result<()> {
        if self.roles.contains_key(role) {
            return Err(Error::RoleAlreadyExists {
                role: role.to_string(),
            });
        }
        self.roles.insert(role.clone(), HashSet::new());
        Ok(())
    }

    fn delete(&mut self, role: &RoleIdentity) -> Result<()> {
        if self.roles.remove(role).is_none() {
            return Err(Error::RoleNotFound {
                role: role.to_string(),
            });
        }
        // Drop membership edges that pointed at the deleted role.
        for parents in self.roles.values_mut() {
            parents.remove(role);
        }
        Ok(())
    }

    fn member_of_roles(&self, role: &RoleIdentity) -> Result<HashSet<RoleIdentity>> {
        self.roles
            .get(role)
            .cloned()
            .ok_or_else(|| Error::RoleNotFound {
                role: role.to_string(),
            })
    }

    fn is_member_of(&self, role: &RoleIdentity, parent: &RoleIdentity) -> Result<bool> {
        Ok(self
            .roles
            .get(role)
            .map(|parents| parents.contains(parent))
            .unwrap_or(false))
    }

    fn add_membership(&mut self, role: &RoleIdentity, parent: &RoleIdentity) -> Result<()> {
        let parents = self.roles.get_mut(role).ok_or_else(|| Error::RoleNotFound {
            role: role.to_string(),
        })?;
        parents.insert(parent.clone());
        Ok(())
    }

    fn remove_membership(&mut self, role: &RoleIdentity, parent: &RoleIdentity) -> Result<()> {
        let parents = self.roles.get_mut(role).ok_or_else(|| Error::RoleNotFound {
            role: role.to_string(),
        })?;
        parents.remove(parent);
        Ok(())
    }

    fn all_roles(&self) -> Result<Vec<RoleIdentity>> {
        Ok(self.roles.keys().cloned().collect())
    }
}
