// shopifyenv: Shopify extension environment switcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use super::{ScanOutcome, Synchronizer, validate_environment_name};
use crate::error::EnvError;
use crate::registry::RegistryStore;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn store_in(dir: &Path) -> RegistryStore {
    RegistryStore::new(dir, "shopifyenv.json")
}

fn write_env(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(format!(".env.{name}")), content).unwrap();
}

fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
}

fn evening() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 18, 30, 0).unwrap()
}

fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Initialize
// =============================================================================

#[test]
fn test_initialize_empty_directory() {
    let temp = temp_dir();
    let store = store_in(temp.path());

    let report = Synchronizer::new(&store).initialize().unwrap();
    assert!(report.outcomes.is_empty());
    assert!(report.keys.is_empty());
    assert!(!report.replaced_existing);

    let doc = store.load().unwrap();
    assert!(doc.current_env.is_none());
    assert!(doc.environments.is_empty());
    assert!(doc.keys.is_empty());
}

#[test]
fn test_initialize_single_environment() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\nB=2");
    let store = store_in(temp.path());

    let report = Synchronizer::new(&store).initialize().unwrap();
    assert_eq!(report.discovered().collect::<Vec<_>>(), ["dev"]);
    assert_eq!(report.keys, ["A", "B"]);

    let doc = store.load().unwrap();
    assert!(doc.current_env.is_none());
    assert_eq!(doc.environments.len(), 1);
    assert_eq!(doc.environments["dev"].path, ".env.dev");
    assert!(doc.environments["dev"].last_used.is_none());
    assert_eq!(doc.keys.iter().collect::<Vec<_>>(), ["A", "B"]);
}

#[test]
fn test_initialize_key_union_collapses_duplicates() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\nB=2\n");
    write_env(temp.path(), "prod", "B=20\nC=30\n");
    let store = store_in(temp.path());

    let report = Synchronizer::new(&store).initialize().unwrap();
    let mut keys = report.keys.clone();
    keys.sort();
    assert_eq!(keys, ["A", "B", "C"]);
    assert_eq!(store.load().unwrap().environments.len(), 2);
}

#[cfg(unix)]
#[test]
fn test_initialize_skips_unreadable_file() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\n");
    // A directory named like an environment file cannot be read as text.
    std::fs::create_dir(temp.path().join(".env.broken")).unwrap();
    let store = store_in(temp.path());

    let report = Synchronizer::new(&store).initialize().unwrap();
    let mut discovered: Vec<_> = report.discovered().collect();
    discovered.sort_unstable();
    assert_eq!(discovered, ["broken", "dev"]);
    assert_eq!(report.registered().collect::<Vec<_>>(), ["dev"]);

    let skipped: Vec<_> = report.skipped().collect();
    assert_eq!(skipped.len(), 1);
    assert!(matches!(
        skipped[0],
        ScanOutcome::Skipped { name, error: EnvError::Io { .. }, .. } if name == "broken"
    ));

    let doc = store.load().unwrap();
    assert!(!doc.environments.contains_key("broken"));
    assert_eq!(doc.keys.iter().collect::<Vec<_>>(), ["A"]);
}

#[test]
fn test_initialize_overwrites_by_default() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\n");
    let store = store_in(temp.path());
    let sync = Synchronizer::new(&store).with_clock(morning);

    sync.initialize().unwrap();
    sync.switch("dev").unwrap();
    assert!(store.load().unwrap().current_env.is_some());

    let report = sync.initialize().unwrap();
    assert!(report.replaced_existing);
    let doc = store.load().unwrap();
    assert!(doc.current_env.is_none());
    assert!(doc.environments["dev"].last_used.is_none());
}

#[test]
fn test_initialize_declined_overwrite_is_cancelled() {
    let temp = temp_dir();
    let store = store_in(temp.path());
    std::fs::write(store.path(), "{\"keep\": true}").unwrap();

    let err = Synchronizer::new(&store)
        .initialize_with(|_| false)
        .unwrap_err();
    assert!(matches!(err, EnvError::Cancelled { .. }));
    assert_eq!(
        std::fs::read_to_string(store.path()).unwrap(),
        "{\"keep\": true}"
    );
}

#[test]
fn test_initialize_confirmation_not_asked_without_registry() {
    let temp = temp_dir();
    let store = store_in(temp.path());

    let report = Synchronizer::new(&store)
        .initialize_with(|_| panic!("nothing to overwrite"))
        .unwrap();
    assert!(!report.replaced_existing);
}

// =============================================================================
// Switch
// =============================================================================

#[test]
fn test_switch_without_registry_is_not_initialized() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\n");
    let store = store_in(temp.path());
    let before = dir_listing(temp.path());

    let err = Synchronizer::new(&store).switch("dev").unwrap_err();
    assert!(matches!(err, EnvError::NotInitialized { .. }));
    assert_eq!(dir_listing(temp.path()), before);
}

#[test]
fn test_switch_unknown_environment_leaves_registry_untouched() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\n");
    let store = store_in(temp.path());
    let sync = Synchronizer::new(&store);
    sync.initialize().unwrap();
    let before = std::fs::read(store.path()).unwrap();

    let err = sync.switch("staging").unwrap_err();
    assert!(matches!(err, EnvError::EnvironmentNotFound { ref name } if name == "staging"));
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_switch_registers_new_environment() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\nB=2");
    let store = store_in(temp.path());
    let sync = Synchronizer::new(&store).with_clock(morning);
    sync.initialize().unwrap();

    write_env(temp.path(), "staging", "C=3");
    let report = sync.switch("staging").unwrap();
    assert!(report.newly_registered);
    assert_eq!(report.new_keys, ["C"]);
    assert_eq!(report.env_path, temp.path().join(".env.staging"));

    let doc = store.load().unwrap();
    assert_eq!(doc.current_env.as_deref(), Some("staging"));
    assert_eq!(doc.environments["staging"].path, ".env.staging");
    assert_eq!(doc.environments["staging"].last_used, Some(morning()));
    assert_eq!(doc.keys.iter().collect::<Vec<_>>(), ["A", "B", "C"]);
}

#[test]
fn test_switch_twice_is_idempotent_for_keys() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\nB=2");
    let store = store_in(temp.path());
    Synchronizer::new(&store).initialize().unwrap();

    let first = Synchronizer::new(&store)
        .with_clock(morning)
        .switch("dev")
        .unwrap();
    assert!(!first.newly_registered);
    assert!(first.new_keys.is_empty());

    let second = Synchronizer::new(&store)
        .with_clock(evening)
        .switch("dev")
        .unwrap();
    assert!(second.new_keys.is_empty());

    let doc = store.load().unwrap();
    assert_eq!(doc.keys.len(), 2);
    assert_eq!(doc.environments["dev"].last_used, Some(evening()));
}

#[test]
fn test_switch_keys_never_shrink() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\nB=2\n");
    write_env(temp.path(), "prod", "A=1\n");
    let store = store_in(temp.path());
    let sync = Synchronizer::new(&store);
    sync.initialize().unwrap();

    let mut last_len = store.load().unwrap().keys.len();
    write_env(temp.path(), "dev", "Z=9\n");
    for name in ["prod", "dev", "prod"] {
        sync.switch(name).unwrap();
        let len = store.load().unwrap().keys.len();
        assert!(len >= last_len);
        last_len = len;
    }
    assert_eq!(
        store.load().unwrap().keys.iter().collect::<Vec<_>>(),
        ["A", "B", "Z"]
    );
}

#[test]
fn test_switch_registered_but_file_vanished() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\n");
    let store = store_in(temp.path());
    let sync = Synchronizer::new(&store);
    sync.initialize().unwrap();
    let before = std::fs::read(store.path()).unwrap();

    std::fs::remove_file(temp.path().join(".env.dev")).unwrap();
    let err = sync.switch("dev").unwrap_err();
    assert!(matches!(err, EnvError::ReadEnvironment { .. }));
    assert!(err.is_not_found());
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_switch_rejects_path_traversal() {
    let temp = temp_dir();
    let store = store_in(temp.path());
    let sync = Synchronizer::new(&store);
    sync.initialize().unwrap();

    for name in ["", "..", "../secrets", "a/b"] {
        let err = sync.switch(name).unwrap_err();
        assert!(matches!(err, EnvError::InvalidName { .. }), "{name:?}");
    }
}

#[test]
fn test_switch_malformed_registry_is_parse_error() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\n");
    let store = store_in(temp.path());
    std::fs::write(store.path(), "{\"environments\": 42}").unwrap();

    let err = Synchronizer::new(&store).switch("dev").unwrap_err();
    assert!(matches!(err, EnvError::Parse { .. }));
}

#[test]
fn test_validate_environment_name() {
    assert!(validate_environment_name("dev").is_ok());
    assert!(validate_environment_name("local.backup").is_ok());
    assert!(validate_environment_name("...").is_ok());
    insta::assert_snapshot!(
        validate_environment_name("a/b").unwrap_err().to_string(),
        @"invalid environment name 'a/b': name contains a path separator"
    );
}

#[cfg(windows)]
#[test]
fn test_validate_environment_name_rejects_backslash() {
    assert!(validate_environment_name("a\\b").is_err());
}

#[cfg(unix)]
#[test]
fn test_backslash_name_discovered_by_init_can_be_used() {
    let temp = temp_dir();
    write_env(temp.path(), "a\\b", "A=1\n");
    let store = store_in(temp.path());
    let sync = Synchronizer::new(&store).with_clock(morning);

    let report = sync.initialize().unwrap();
    assert_eq!(report.registered().collect::<Vec<_>>(), ["a\\b"]);

    let switched = sync.switch("a\\b").unwrap();
    assert!(!switched.newly_registered);
    assert_eq!(store.load().unwrap().current_env.as_deref(), Some("a\\b"));
}

#[test]
fn test_switch_replaces_unreadable_last_used() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\n");
    let store = store_in(temp.path());
    std::fs::write(
        store.path(),
        r#"{"currentEnv":null,"environments":{"dev":{"path":".env.dev","lastUsed":"yesterday"}},"keys":["A"]}"#,
    )
    .unwrap();

    Synchronizer::new(&store)
        .with_clock(evening)
        .switch("dev")
        .unwrap();
    let doc = store.load().unwrap();
    assert_eq!(doc.environments["dev"].last_used, Some(evening()));
}

#[test]
fn test_initialize_records_keys_after_malformed_quote() {
    let temp = temp_dir();
    write_env(temp.path(), "dev", "A=1\nB=\"oops\nMY-KEY=3\n");
    let store = store_in(temp.path());

    Synchronizer::new(&store).initialize().unwrap();
    assert_eq!(
        store.load().unwrap().keys.iter().collect::<Vec<_>>(),
        ["A", "B", "MY-KEY"]
    );
}
