//! Role reconciler
//!
//! Converges a live role store toward the serialized source of truth: for
//! every in-scope serialized role the role is created if missing and its
//! direct parent-membership set is diffed into place; optionally, in-scope
//! store roles absent from the serialized set are evicted.
//!
//! Every run is a pure convergence toward the target state, so rerunning
//! after a failure is the recovery mechanism. There is no retry and no
//! rollback; store failures abort the remainder of the run.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use rolesync_store::{RoleIdentity, RoleStore, SerializedRole};

use crate::Result;
use crate::logger::{DeferredLogWriter, LoaderLogger};
use crate::predicate::RolePredicate;

/// Options for a load operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, simulate changes without mutating the store.
    /// Actions will be prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}

/// Report from a load operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Roles created because they were missing from the store
    pub roles_added: usize,
    /// Membership edges added across all reconciled roles
    pub memberships_added: usize,
    /// Membership edges removed across all reconciled roles
    pub memberships_removed: usize,
    /// In-scope orphan roles deleted from the store
    pub orphans_removed: usize,
    /// Human-readable actions taken (or simulated) during the run
    pub actions: Vec<String>,
}

impl SyncReport {
    /// Whether the run changed (or would change) nothing.
    pub fn is_noop(&self) -> bool {
        self.roles_added == 0
            && self.memberships_added == 0
            && self.memberships_removed == 0
            && self.orphans_removed == 0
    }

    fn push_action(&mut self, dry_run: bool, action: &str) {
        if dry_run {
            self.actions.push(format!("[dry-run] Would {action}"));
        } else {
            let mut chars = action.chars();
            let capitalized = match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            };
            self.actions.push(capitalized);
        }
    }
}

/// Reconciles serialized roles into a live role store.
pub struct RoleLoader<'a> {
    predicate: &'a dyn RolePredicate,
    logger: &'a dyn LoaderLogger,
    /// Delete in-scope store roles absent from the serialized set
    remove_orphans: bool,
}

impl<'a> RoleLoader<'a> {
    /// Create a loader over the given predicate and notification sink.
    pub fn new(
        predicate: &'a dyn RolePredicate,
        logger: &'a dyn LoaderLogger,
        remove_orphans: bool,
    ) -> Self {
        Self {
            predicate,
            logger,
            remove_orphans,
        }
    }

    /// Reconcile `roles` into `store`.
    ///
    /// # Errors
    ///
    /// Store operation failures propagate uncaught and abort the remainder
    /// of the run; mutations already applied are not rolled back.
    pub fn load(&self, store: &mut dyn RoleStore, roles: &[SerializedRole]) -> Result<SyncReport> {
        self.load_with_options(store, roles, SyncOptions::default())
    }

    /// Reconcile `roles` into `store` with explicit options.
    pub fn load_with_options(
        &self,
        store: &mut dyn RoleStore,
        roles: &[SerializedRole],
        options: SyncOptions,
    ) -> Result<SyncReport> {
        // Bracket the whole run so the store can suppress bulk side
        // effects; the bracket is closed on the failure path too.
        store.begin_sync();
        let outcome = self.run(store, roles, options);
        let closed = store.end_sync();

        let report = outcome?;
        closed?;
        Ok(report)
    }

    fn run(
        &self,
        store: &mut dyn RoleStore,
        roles: &[SerializedRole],
        options: SyncOptions,
    ) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        // Roles a dry run has "created" so far. A real run sees its own
        // creations through the store; the simulation consults this set
        // instead, so both report the same work.
        let mut dry_created: HashSet<RoleIdentity> = HashSet::new();

        let retained: Vec<&SerializedRole> = roles
            .iter()
            .filter(|role| self.predicate.includes(&role.role_name).is_included())
            .collect();

        tracing::debug!(
            serialized = roles.len(),
            retained = retained.len(),
            "Reconciling serialized roles"
        );

        for role in &retained {
            self.reconcile_role(store, role, options, &mut dry_created, &mut report)?;
        }

        if self.remove_orphans {
            self.evaluate_orphans(store, &retained, options, &dry_created, &mut report)?;
        }

        Ok(report)
    }

    /// Bring one role in line with its serialized record.
    fn reconcile_role(
        &self,
        store: &mut dyn RoleStore,
        role: &SerializedRole,
        options: SyncOptions,
        dry_created: &mut HashSet<RoleIdentity>,
        report: &mut SyncReport,
    ) -> Result<()> {
        let mut added_role = false;

        // Add the role if needed. A role already "created" earlier in a
        // dry run, say as another role's referenced parent, counts as
        // present.
        if !store.exists(&role.role_name)? && !dry_created.contains(&role.role_name) {
            self.logger.added_new_role(&role.role_name);
            added_role = true;
            report.roles_added += 1;
            report.push_action(options.dry_run, &format!("create role {}", role.role_name));
            if options.dry_run {
                dry_created.insert(role.role_name.clone());
            } else {
                store.create(&role.role_name)?;
            }
        }

        // Snapshot the store's parent set before mutating it. A role
        // created during this run has none.
        let simulated = options.dry_run && dry_created.contains(&role.role_name);
        let current_source_parents = if added_role || simulated {
            HashSet::new()
        } else {
            store.member_of_roles(&role.role_name)?
        };
        let current_target_parents = role.member_of_set();

        let mut added_membership: Vec<RoleIdentity> = Vec::new();
        let mut removed_membership: Vec<RoleIdentity> = Vec::new();
        let mut deferred_log = DeferredLogWriter::new();

        for parent in &role.member_of {
            // Create a nonexistent parent role if needed. The parent need
            // not be serialized or in scope itself. The notification is
            // deferred so it does not interleave with this role's own
            // reporting.
            if !store.exists(parent)? && !dry_created.contains(parent) {
                let created = parent.clone();
                deferred_log.defer(move |log| log.added_new_role_membership(&created));
                report.push_action(options.dry_run, &format!("create referenced role {parent}"));
                if options.dry_run {
                    dry_created.insert(parent.clone());
                } else {
                    store.create(parent)?;
                }
            }

            // Add the membership if not already in the parent role
            let already_member = if options.dry_run {
                added_membership.contains(parent)
                    || (!simulated && store.is_member_of(&role.role_name, parent)?)
            } else {
                store.is_member_of(&role.role_name, parent)?
            };
            if !already_member {
                added_membership.push(parent.clone());
                report.memberships_added += 1;
                report.push_action(
                    options.dry_run,
                    &format!("add {} to {parent}", role.role_name),
                );
                if !options.dry_run {
                    store.add_membership(&role.role_name, parent)?;
                }
            }
        }

        // Remove parent memberships present in the store but absent from
        // the serialized set
        for parent in &current_source_parents {
            if !current_target_parents.contains(parent) {
                removed_membership.push(parent.clone());
                report.memberships_removed += 1;
                report.push_action(
                    options.dry_run,
                    &format!("remove {} from {parent}", role.role_name),
                );
                if !options.dry_run {
                    store.remove_membership(&role.role_name, parent)?;
                }
            }
        }

        // A brand-new role's full membership is implied by its creation,
        // so no membership-changed notification for it
        if !added_role && (!added_membership.is_empty() || !removed_membership.is_empty()) {
            self.logger.role_membership_changed(
                &role.role_name,
                &added_membership,
                &removed_membership,
            );
        }

        deferred_log.flush(self.logger);

        Ok(())
    }

    /// Delete in-scope store roles that no serialized record declares.
    fn evaluate_orphans(
        &self,
        store: &mut dyn RoleStore,
        retained: &[&SerializedRole],
        options: SyncOptions,
        dry_created: &HashSet<RoleIdentity>,
        report: &mut SyncReport,
    ) -> Result<()> {
        let known_roles: HashSet<&RoleIdentity> =
            retained.iter().map(|role| &role.role_name).collect();

        // A dry run never wrote its created roles to the store, so they
        // join the candidate list here; a real run reads them back from
        // `all_roles`.
        let mut candidates = store.all_roles()?;
        if options.dry_run {
            candidates.extend(dry_created.iter().cloned());
        }

        let orphans: Vec<RoleIdentity> = candidates
            .into_iter()
            .filter(|candidate| self.predicate.includes(candidate).is_included())
            .filter(|candidate| !known_roles.contains(candidate))
            .collect();

        for orphan in orphans {
            self.logger.removed_orphan_role(&orphan);
            report.orphans_removed += 1;
            report.push_action(options.dry_run, &format!("delete orphan role {orphan}"));
            if !options.dry_run {
                store.delete(&orphan)?;
            }
        }

        Ok(())
    }
}
