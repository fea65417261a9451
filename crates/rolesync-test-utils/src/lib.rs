//! Shared test utilities for the rolesync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`logger`] — [`RecordingLogger`] capturing loader notifications
//! - [`fixtures`] — serialized-role and store builders

pub mod fixtures;
pub mod logger;

pub use fixtures::{role, store_with};
pub use logger::{LogEvent, RecordingLogger};
