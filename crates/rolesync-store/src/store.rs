//! Store contracts
//!
//! Two trait seams separate the reconciler from its collaborators: the
//! read-only source of serialized roles, and the live read/write target.
//! Backends are host-specific; the bundled ones are in-memory and
//! TOML-file-backed.

use std::collections::HashSet;

use crate::Result;
use crate::identity::RoleIdentity;
use crate::model::SerializedRole;

/// Read-only source of serialized role records.
pub trait RoleDataStore: Send + Sync {
    /// All serialized roles in the current sync scope. Order unspecified.
    fn get_all(&self) -> Result<Vec<SerializedRole>>;
}

/// The live role store a sync run converges toward the serialized state.
///
/// Only direct parent membership is modeled; nested membership resolution
/// and cycle handling are the backing store's concern.
pub trait RoleStore: Send {
    /// Whether a role exists.
    fn exists(&self, role: &RoleIdentity) -> Result<bool>;

    /// Create a role with no memberships.
    fn create(&mut self, role: &RoleIdentity) -> Result<()>;

    /// Delete a role and any membership edges pointing at it.
    fn delete(&mut self, role: &RoleIdentity) -> Result<()>;

    /// The direct parent roles of `role`.
    fn member_of_roles(&self, role: &RoleIdentity) -> Result<HashSet<RoleIdentity>>;

    /// Whether `role` is a direct member of `parent`.
    fn is_member_of(&self, role: &RoleIdentity, parent: &RoleIdentity) -> Result<bool>;

    /// Make `role` a direct member of `parent`.
    fn add_membership(&mut self, role: &RoleIdentity, parent: &RoleIdentity) -> Result<()>;

    /// Remove `role`'s direct membership in `parent`.
    fn remove_membership(&mut self, role: &RoleIdentity, parent: &RoleIdentity) -> Result<()>;

    /// Every role currently in the store.
    fn all_roles(&self) -> Result<Vec<RoleIdentity>>;

    /// Open a bulk-operation bracket around a sync run.
    ///
    /// Stores with per-mutation side effects (persistence, change
    /// notifications) may suspend them until [`RoleStore::end_sync`].
    fn begin_sync(&mut self) {}

    /// Close the bulk-operation bracket opened by [`RoleStore::begin_sync`].
    ///
    /// Called unconditionally, on the failure path too, so suspended side
    /// effects observe whatever partial state the run reached.
    fn end_sync(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Fixed-content data store, mainly useful in tests and examples.
pub struct StaticRoleDataStore {
    roles: Vec<SerializedRole>,
}

impl StaticRoleDataStore {
    /// Create a data store that always returns the given records.
    pub fn new(roles: Vec<SerializedRole>) -> Self {
        Self { roles }
    }
}

impl RoleDataStore for StaticRoleDataStore {
    fn get_all(&self) -> Result<Vec<SerializedRole>> {
        Ok(self.roles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_static_data_store_returns_its_records() {
        let store = StaticRoleDataStore::new(vec![SerializedRole::new(
            r"sitecore\Author",
            vec![RoleIdentity::new(r"sitecore\Editors")],
        )]);

        let roles = store.get_all().unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].role_name, RoleIdentity::new(r"sitecore\Author"));
    }
}
