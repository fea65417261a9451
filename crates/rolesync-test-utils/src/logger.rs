//! Recording loader logger for assertions on notification streams.

use std::sync::Mutex;

use rolesync_store::{LoaderLogger, RoleIdentity};

/// One captured loader notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    AddedNewRole(RoleIdentity),
    AddedNewRoleMembership(RoleIdentity),
    RoleMembershipChanged {
        role: RoleIdentity,
        added: Vec<RoleIdentity>,
        removed: Vec<RoleIdentity>,
    },
    RemovedOrphanRole(RoleIdentity),
}

/// A [`LoaderLogger`] that records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl RecordingLogger {
    /// Create an empty recording logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications captured so far, in emission order.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Whether no notifications were captured.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }

    fn record(&self, event: LogEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl LoaderLogger for RecordingLogger {
    fn added_new_role(&self, role: &RoleIdentity) {
        self.record(LogEvent::AddedNewRole(role.clone()));
    }

    fn added_new_role_membership(&self, parent: &RoleIdentity) {
        self.record(LogEvent::AddedNewRoleMembership(parent.clone()));
    }

    fn role_membership_changed(
        &self,
        role: &RoleIdentity,
        added: &[RoleIdentity],
        removed: &[RoleIdentity],
    ) {
        self.record(LogEvent::RoleMembershipChanged {
            role: role.clone(),
            added: added.to_vec(),
            removed: removed.to_vec(),
        });
    }

    fn removed_orphan_role(&self, role: &RoleIdentity) {
        self.record(LogEvent::RemovedOrphanRole(role.clone()));
    }
}
