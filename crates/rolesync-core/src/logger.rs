//! Loader notification sinks
//!
//! The [`LoaderLogger`] contract itself lives in `rolesync-store` next to
//! the other collaborator traits; this module provides the sinks the
//! reconciler ships with and the deferral machinery it needs.

use rolesync_store::RoleIdentity;

pub use rolesync_store::LoaderLogger;

/// Logger emitting structured tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLoaderLogger;

impl LoaderLogger for TracingLoaderLogger {
    fn added_new_role(&self, role: &RoleIdentity) {
        tracing::info!(role = %role, "Added new role");
    }

    fn added_new_role_membership(&self, parent: &RoleIdentity) {
        tracing::info!(role = %parent, "Added new role referenced by a membership");
    }

    fn role_membership_changed(
        &self,
        role: &RoleIdentity,
        added: &[RoleIdentity],
        removed: &[RoleIdentity],
    ) {
        tracing::info!(
            role = %role,
            added = added.len(),
            removed = removed.len(),
            "Role membership changed"
        );
    }

    fn removed_orphan_role(&self, role: &RoleIdentity) {
        tracing::info!(role = %role, "Removed orphan role");
    }
}

/// Ordered queue of notifications to replay later.
///
/// A parent role can be created as a side effect of reconciling an
/// unrelated child role; reporting that immediately would interleave with
/// the child's own notifications. Entries are queued during the unit of
/// work and flushed once, in queue order, when it completes.
#[derive(Default)]
pub struct DeferredLogWriter {
    entries: Vec<Box<dyn FnOnce(&dyn LoaderLogger) + Send>>,
}

impl DeferredLogWriter {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification for later replay.
    pub fn defer(&mut self, entry: impl FnOnce(&dyn LoaderLogger) + Send + 'static) {
        self.entries.push(Box::new(entry));
    }

    /// Whether anything is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replay every queued notification against `logger`, in queue order.
    pub fn flush(self, logger: &dyn LoaderLogger) {
        for entry in self.entries {
            entry(logger);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rolesync_test_utils::{LogEvent, RecordingLogger};

    #[test]
    fn test_flush_replays_in_queue_order() {
        let logger = RecordingLogger::new();
        let mut deferred = DeferredLogWriter::new();

        let first = RoleIdentity::new(r"sitecore\First");
        let second = RoleIdentity::new(r"sitecore\Second");
        deferred.defer(move |log| log.added_new_role_membership(&first));
        deferred.defer(move |log| log.added_new_role_membership(&second));

        deferred.flush(&logger);

        assert_eq!(
            logger.events(),
            vec![
                LogEvent::AddedNewRoleMembership(RoleIdentity::new(r"sitecore\First")),
                LogEvent::AddedNewRoleMembership(RoleIdentity::new(r"sitecore\Second")),
            ]
        );
    }

    #[test]
    fn test_empty_queue_flushes_nothing() {
        let logger = RecordingLogger::new();
        let deferred = DeferredLogWriter::new();

        assert!(deferred.is_empty());
        deferred.flush(&logger);
        assert!(logger.events().is_empty());
    }
}
