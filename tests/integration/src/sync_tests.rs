//! End-to-end reconciliation tests
//!
//! These tests exercise the complete flow: serialized role files on disk
//! -> predicate scoping -> loader -> TOML-file role store.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use rolesync_core::{ConfigRolePredicate, IncludeRule, RoleLoader, SyncSettings};
use rolesync_store::{
    DirRoleDataStore, FileRoleStore, RoleDataStore, RoleIdentity, RoleStore,
};
use rolesync_test_utils::RecordingLogger;

fn id(s: &str) -> RoleIdentity {
    RoleIdentity::new(s)
}

/// Write a serialized role file into the source directory.
fn write_role(source: &Path, file: &str, role: &str, member_of: &[&str]) {
    let mut content = format!("role = '{role}'\n");
    if !member_of.is_empty() {
        let parents = member_of
            .iter()
            .map(|parent| format!("'{parent}'"))
            .collect::<Vec<_>>()
            .join(", ");
        content.push_str(&format!("member_of = [{parents}]\n"));
    }
    fs::write(source.join(file), content).unwrap();
}

/// Set up a source directory with a small role tree.
fn setup_source(temp: &TempDir) -> std::path::PathBuf {
    let source = temp.path().join("roles");
    fs::create_dir(&source).unwrap();
    write_role(&source, "admins.toml", r"sitecore\Admins", &[r"sitecore\Editors"]);
    write_role(&source, "editors.toml", r"sitecore\Editors", &[]);
    write_role(&source, "authors.toml", r"sitecore\Authors", &[r"sitecore\Editors"]);
    source
}

#[test]
fn test_full_pipeline_converges_and_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let source = setup_source(&temp);
    let store_path = temp.path().join("store.toml");

    let roles = DirRoleDataStore::new(&source).get_all().unwrap();
    let predicate = ConfigRolePredicate::new(&[]).unwrap();

    let logger = RecordingLogger::new();
    let loader = RoleLoader::new(&predicate, &logger, true);
    let mut store = FileRoleStore::open(&store_path).unwrap();
    let report = loader.load(&mut store, &roles).unwrap();

    // Editors is created as a referenced parent while reconciling Admins,
    // so only two serialized roles are reported as added outright
    assert_eq!(report.roles_added, 2);
    assert_eq!(report.memberships_added, 2);
    drop(store);

    // Reopen from disk: the persisted state must match the serialized set
    let reopened = FileRoleStore::open(&store_path).unwrap();
    assert!(
        reopened
            .is_member_of(&id(r"sitecore\Admins"), &id(r"sitecore\Editors"))
            .unwrap()
    );
    assert!(
        reopened
            .is_member_of(&id(r"sitecore\Authors"), &id(r"sitecore\Editors"))
            .unwrap()
    );

    // Second run against the reopened store is a no-op
    let second_logger = RecordingLogger::new();
    let second_loader = RoleLoader::new(&predicate, &second_logger, true);
    let mut reopened = reopened;
    let second = second_loader.load(&mut reopened, &roles).unwrap();

    assert!(second.is_noop());
    assert!(second_logger.is_empty());
}

#[test]
fn test_convergence_from_drifted_store() {
    let temp = TempDir::new().unwrap();
    let source = setup_source(&temp);
    let store_path = temp.path().join("store.toml");

    // Pre-populate the store with drift: a stale membership, a missing
    // role, and an in-scope orphan.
    {
        let mut store = FileRoleStore::open(&store_path).unwrap();
        store.create(&id(r"sitecore\Admins")).unwrap();
        store.create(&id(r"sitecore\Stale")).unwrap();
        store
            .add_membership(&id(r"sitecore\Admins"), &id(r"sitecore\Stale"))
            .unwrap();
        store.create(&id(r"sitecore\OldRole")).unwrap();
    }

    let roles = DirRoleDataStore::new(&source).get_all().unwrap();
    let predicate = ConfigRolePredicate::new(&[]).unwrap();
    let logger = RecordingLogger::new();
    let loader = RoleLoader::new(&predicate, &logger, true);

    let mut store = FileRoleStore::open(&store_path).unwrap();
    loader.load(&mut store, &roles).unwrap();

    // The in-scope role set equals exactly the serialized set
    let expected: HashSet<RoleIdentity> = [
        id(r"sitecore\Admins"),
        id(r"sitecore\Editors"),
        id(r"sitecore\Authors"),
    ]
    .into_iter()
    .collect();
    let actual: HashSet<RoleIdentity> = store.all_roles().unwrap().into_iter().collect();
    assert_eq!(actual, expected);

    // Each role's parent set equals its serialized set exactly
    assert_eq!(
        store.member_of_roles(&id(r"sitecore\Admins")).unwrap(),
        [id(r"sitecore\Editors")].into_iter().collect()
    );
    assert_eq!(
        store.member_of_roles(&id(r"sitecore\Editors")).unwrap(),
        HashSet::new()
    );
}

#[test]
fn test_predicate_scoping_protects_foreign_domains() {
    let temp = TempDir::new().unwrap();
    let source = setup_source(&temp);
    let store_path = temp.path().join("store.toml");

    // An out-of-scope role already lives in the store
    {
        let mut store = FileRoleStore::open(&store_path).unwrap();
        store.create(&id(r"extranet\Visitors")).unwrap();
    }

    let settings: SyncSettings = SyncSettings {
        remove_orphans: true,
        include: vec![IncludeRule::domain("sitecore")],
    };
    let roles = DirRoleDataStore::new(&source).get_all().unwrap();
    let predicate = ConfigRolePredicate::new(&settings.include).unwrap();
    let logger = RecordingLogger::new();
    let loader = RoleLoader::new(&predicate, &logger, settings.remove_orphans);

    let mut store = FileRoleStore::open(&store_path).unwrap();
    loader.load(&mut store, &roles).unwrap();

    // Orphan eviction ran, but the foreign-domain role survived
    assert!(store.exists(&id(r"extranet\Visitors")).unwrap());
    assert!(store.exists(&id(r"sitecore\Admins")).unwrap());
}

#[test]
fn test_settings_file_drives_the_run() {
    let temp = TempDir::new().unwrap();
    let source = setup_source(&temp);
    let settings_path = temp.path().join("sync.toml");
    fs::write(
        &settings_path,
        r#"
remove_orphans = true

[[include]]
domain = "sitecore"
pattern = "^(Admins|Editors)$"
"#,
    )
    .unwrap();

    let settings = SyncSettings::load(&settings_path).unwrap();
    let roles = DirRoleDataStore::new(&source).get_all().unwrap();
    let predicate = ConfigRolePredicate::new(&settings.include).unwrap();
    let logger = RecordingLogger::new();
    let loader = RoleLoader::new(&predicate, &logger, settings.remove_orphans);

    let store_path = temp.path().join("store.toml");
    let mut store = FileRoleStore::open(&store_path).unwrap();
    loader.load(&mut store, &roles).unwrap();

    // Authors is filtered out by the pattern; Admins and Editors sync
    assert!(store.exists(&id(r"sitecore\Admins")).unwrap());
    assert!(store.exists(&id(r"sitecore\Editors")).unwrap());
    assert!(!store.exists(&id(r"sitecore\Authors")).unwrap());
}
