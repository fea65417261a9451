//! Builders for serialized roles and pre-populated stores.

use rolesync_store::{MemoryRoleStore, RoleIdentity, SerializedRole};

/// Build a serialized role with the given parent role names.
pub fn role(name: &str, member_of: &[&str]) -> SerializedRole {
    SerializedRole::new(
        name,
        member_of.iter().map(|parent| RoleIdentity::new(*parent)).collect(),
    )
}

/// Build an in-memory store seeded with `(role, parents)` entries.
///
/// Parents are created implicitly when not listed as entries themselves.
pub fn store_with(entries: &[(&str, &[&str])]) -> MemoryRoleStore {
    let mut store = MemoryRoleStore::new();
    for (name, parents) in entries {
        store.insert_role(
            *name,
            parents.iter().map(|parent| RoleIdentity::new(*parent)).collect(),
        );
    }
    store
}
