//! Role store contracts and backends for Rolesync
//!
//! This crate is the layer-0 foundation of the workspace:
//!
//! - **Identity**: [`RoleIdentity`] — the case-insensitive `domain\name`
//!   key every lookup goes through
//! - **Model**: [`SerializedRole`] — one record from the source of truth
//! - **Contracts**: [`RoleStore`] (live read/write target),
//!   [`RoleDataStore`] (read-only serialized source), and
//!   [`LoaderLogger`] (reconciliation notification sink)
//! - **Backends**: [`MemoryRoleStore`], [`FileRoleStore`], and
//!   [`DirRoleDataStore`]
//!
//! The reconciler in `rolesync-core` only ever talks to the two trait
//! contracts; any backing technology that implements them will do.

pub mod dir_store;
pub mod error;
pub mod file;
pub mod identity;
pub mod logger;
pub mod memory;
pub mod model;
pub mod store;

pub use dir_store::DirRoleDataStore;
pub use error::{Error, Result};
pub use file::FileRoleStore;
pub use identity::{DOMAIN_SEPARATOR, RoleIdentity};
pub use logger::LoaderLogger;
pub use memory::MemoryRoleStore;
pub use model::SerializedRole;
pub use store::{RoleDataStore, RoleStore, StaticRoleDataStore};
