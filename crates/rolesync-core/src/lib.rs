//! Inclusion predicate and role reconciler for Rolesync
//!
//! This crate implements the core of the system:
//!
//! - **Predicate**: [`ConfigRolePredicate`] decides which roles are in
//!   scope from an ordered list of include rules
//! - **Loader**: [`RoleLoader`] converges a live [`rolesync_store::RoleStore`]
//!   toward the serialized source of truth — role creation, membership
//!   diffing, and optional orphan eviction
//! - **Notifications**: [`LoaderLogger`] observational sink, with a
//!   deferred queue for mid-loop parent-role creation
//! - **Settings**: [`SyncSettings`] typed `sync.toml` view
//!
//! # Architecture
//!
//! ```text
//!        CLI
//!         |
//!   rolesync-core        (predicate, loader)
//!         |
//!   rolesync-store       (identity, contracts, backends)
//! ```
//!
//! Runs are single-threaded and synchronous: roles reconcile sequentially
//! and every store call blocks. A run either completes or fails outright
//! with a propagated error; rerunning re-converges from any partial state.

pub mod error;
pub mod loader;
pub mod logger;
pub mod predicate;
pub mod settings;

pub use error::{Error, Result};
pub use loader::{RoleLoader, SyncOptions, SyncReport};
pub use logger::{DeferredLogWriter, LoaderLogger, TracingLoaderLogger};
pub use predicate::{ConfigRolePredicate, PredicateResult, RolePredicate};
pub use settings::{IncludeRule, SyncSettings};
