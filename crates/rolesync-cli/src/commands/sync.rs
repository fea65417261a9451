//! Sync and check command implementations
//!
//! Both commands load the serialized roles and settings, build the
//! predicate, and run the loader; check runs it in dry-run mode and
//! reports drift without touching the store.

use std::path::Path;

use colored::Colorize;

use rolesync_core::{
    ConfigRolePredicate, RoleLoader, SyncOptions, SyncReport, SyncSettings, TracingLoaderLogger,
};
use rolesync_store::{DirRoleDataStore, FileRoleStore, RoleDataStore, SerializedRole};

use crate::error::Result;

/// Load settings from the given path, or defaults when none was given.
fn load_settings(config: Option<&Path>) -> Result<SyncSettings> {
    match config {
        Some(path) => Ok(SyncSettings::load(path)?),
        None => Ok(SyncSettings::default()),
    }
}

/// Load the serialized roles and run the loader against the store file.
fn run_loader(
    source: &Path,
    store_path: &Path,
    settings: &SyncSettings,
    options: SyncOptions,
) -> Result<SyncReport> {
    let roles: Vec<SerializedRole> = DirRoleDataStore::new(source).get_all()?;
    let mut store = FileRoleStore::open(store_path)?;

    let predicate = ConfigRolePredicate::new(&settings.include)?;
    let logger = TracingLoaderLogger;
    let loader = RoleLoader::new(&predicate, &logger, settings.remove_orphans);

    Ok(loader.load_with_options(&mut store, &roles, options)?)
}

/// Run the sync command
pub fn run_sync(
    source: &Path,
    store: &Path,
    config: Option<&Path>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let settings = load_settings(config)?;

    if !json {
        println!("{} Synchronizing roles...", "=>".blue().bold());
    }

    let report = run_loader(source, store, &settings, SyncOptions { dry_run })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_noop() {
        println!("{} Already synchronized. No changes needed.", "OK".green().bold());
    } else {
        println!("{} Synchronization complete:", "OK".green().bold());
        for action in &report.actions {
            println!("   {} {}", "+".green(), action);
        }
        println!(
            "   {} roles added, {} memberships added, {} removed, {} orphans evicted",
            report.roles_added,
            report.memberships_added,
            report.memberships_removed,
            report.orphans_removed
        );
    }

    Ok(())
}

/// Run the check command
///
/// Returns whether drift was detected, so the caller can set the exit code.
pub fn run_check(source: &Path, store: &Path, config: Option<&Path>, json: bool) -> Result<bool> {
    let settings = load_settings(config)?;

    if !json {
        println!("{} Checking role store for drift...", "=>".blue().bold());
    }

    let report = run_loader(source, store, &settings, SyncOptions { dry_run: true })?;
    let drifted = !report.is_noop();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(drifted);
    }

    if drifted {
        println!("{} Role store has drifted:", "DRIFT".red().bold());
        for action in &report.actions {
            println!("   {} {}", "!".red(), action);
        }
        println!();
        println!("Run {} to repair.", "rolesync sync".cyan());
    } else {
        println!("{} Role store is in sync. No drift detected.", "OK".green().bold());
    }

    Ok(drifted)
}
