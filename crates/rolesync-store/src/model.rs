//! Serialized role model
//!
//! A `SerializedRole` is one record from the source of truth: a role name
//! plus the set of parent roles it should belong to. Records are produced
//! fresh for every sync run and never written back by the reconciler.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::identity::RoleIdentity;

/// A role as declared in the serialized source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedRole {
    /// The role this record describes
    #[serde(rename = "role")]
    pub role_name: RoleIdentity,

    /// Parent roles this role should be a member of
    #[serde(default)]
    pub member_of: Vec<RoleIdentity>,
}

impl SerializedRole {
    /// Create a serialized role record.
    pub fn new(role_name: impl Into<RoleIdentity>, member_of: Vec<RoleIdentity>) -> Self {
        Self {
            role_name: role_name.into(),
            member_of,
        }
    }

    /// The declared parent set, deduplicated case-insensitively.
    pub fn member_of_set(&self) -> HashSet<RoleIdentity> {
        self.member_of.iter().cloned().collect()
    }
}
