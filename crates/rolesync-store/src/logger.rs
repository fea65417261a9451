//! Reconciliation notification sink
//!
//! The reconciler reports what it changed through the [`LoaderLogger`]
//! trait. Notifications are fire-and-forget observational side effects,
//! never an error channel. The trait lives alongside the store contracts
//! so that sink implementations only need this crate.

use crate::identity::RoleIdentity;

/// Sink for reconciliation notifications.
pub trait LoaderLogger: Send + Sync {
    /// A serialized role was created in the store.
    fn added_new_role(&self, role: &RoleIdentity);

    /// A parent role referenced by a membership set was created mid-loop.
    fn added_new_role_membership(&self, parent: &RoleIdentity);

    /// An existing role's membership set changed.
    fn role_membership_changed(
        &self,
        role: &RoleIdentity,
        added: &[RoleIdentity],
        removed: &[RoleIdentity],
    );

    /// An in-scope role absent from the serialized set was deleted.
    fn removed_orphan_role(&self, role: &RoleIdentity);
}
