//! Integration tests for the persisted project registry.

mod common;

use std::fs;

use common::Sandbox;
use parkour::database::DatabaseConfig;
use parkour::{FieldUpdate, PathError, Registry, StoreError, MAX_PRIORITY};

#[test]
fn test_first_use_scenario() {
    let sandbox = Sandbox::new();
    let proj = sandbox.dir("proj");

    let mut registry = sandbox.registry();
    assert!(registry.list().unwrap().is_empty());
    assert!(!sandbox.database_path().exists());

    let added = registry.add(&proj).unwrap();
    assert_eq!(added.kind(), None);
    assert_eq!(added.priority(), 0);
    assert!(added.last_visited_at().is_none());

    let visited = registry.get(&proj).unwrap().unwrap();
    assert_eq!(visited.priority(), 1);
    assert!(visited.last_visited_at().is_some());
}

#[test]
fn test_round_trip_across_instances() {
    let sandbox = Sandbox::new();
    let a = sandbox.dir("a");
    let b = sandbox.dir("b");

    {
        let mut registry = sandbox.registry();
        registry.add(&a).unwrap();
        registry.add(&b).unwrap();
        registry
            .update(&a, FieldUpdate::Kind(Some("rust".into())))
            .unwrap();
        registry.update_field(&b, "build-command", "make all").unwrap();
        registry.set_blacklisted(sandbox.dir("hidden"), true).unwrap();
    }

    let first = sandbox.registry();
    let second = sandbox.registry();
    assert_eq!(first.list().unwrap(), second.list().unwrap());

    let projects = second.list().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].kind(), Some("rust"));
    assert_eq!(projects[1].build_command(), ["make", "all"]);
    assert_eq!(second.list_blacklist().unwrap(), [sandbox.path("hidden")]);
}

#[test]
fn test_mutations_act_on_stored_state_not_stale_snapshot() {
    let sandbox = Sandbox::new();
    let removed = sandbox.dir("removed");
    let visited = sandbox.dir("visited");
    let unhidden = sandbox.dir("unhidden");

    let mut stale = sandbox.registry();
    let mut other = sandbox.registry();
    other.add(&removed).unwrap();
    other.add(&visited).unwrap();
    other.set_blacklisted(&unhidden, true).unwrap();

    assert!(stale.remove(&removed).unwrap());
    let project = stale.get(&visited).unwrap().unwrap();
    assert_eq!(project.priority(), 1);
    stale
        .update(&visited, FieldUpdate::Kind(Some("zig".into())))
        .unwrap();
    stale.set_blacklisted(&unhidden, false).unwrap();

    let fresh = sandbox.registry();
    let projects = fresh.list().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].path().as_path(), visited);
    assert_eq!(projects[0].priority(), 1);
    assert_eq!(projects[0].kind(), Some("zig"));
    assert!(fresh.list_blacklist().unwrap().is_empty());
}

#[test]
fn test_lookups_do_not_create_state_file() {
    let sandbox = Sandbox::new();
    let proj = sandbox.dir("proj");

    let mut registry = sandbox.registry();
    assert!(registry.get(&proj).unwrap().is_none());
    assert!(!registry.remove(&proj).unwrap());
    registry.set_blacklisted(&proj, false).unwrap();
    assert!(matches!(
        registry.update_field(&proj, "kind", "go"),
        Err(StoreError::NotFound { .. })
    ));
    assert!(!sandbox.database_path().exists());
}

#[test]
fn test_add_with_kind_is_one_record() {
    let sandbox = Sandbox::new();
    let proj = sandbox.dir("proj");

    let mut registry = sandbox.registry();
    let added = registry.add_with_kind(&proj, Some("go".into())).unwrap();
    assert_eq!(added.kind(), Some("go"));
    assert!(matches!(
        registry.add_with_kind(&proj, None),
        Err(StoreError::AlreadyExists { .. })
    ));

    let reloaded = sandbox.registry();
    assert_eq!(reloaded.list().unwrap()[0].kind(), Some("go"));
}

#[test]
fn test_priority_limits_round_trip() {
    let sandbox = Sandbox::new();
    let proj = sandbox.dir("proj");

    let mut registry = sandbox.registry();
    registry.add(&proj).unwrap();
    registry
        .update_field(&proj, "priority", &MAX_PRIORITY.to_string())
        .unwrap();
    assert_eq!(registry.get(&proj).unwrap().unwrap().priority(), MAX_PRIORITY);

    let err = registry
        .update_field(&proj, "priority", "18446744073709551615")
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidValue { .. }));

    let reloaded = sandbox.registry();
    assert_eq!(reloaded.list().unwrap()[0].priority(), MAX_PRIORITY);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_directory_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let sandbox = Sandbox::new();
    let odd = sandbox.root().join(OsStr::from_bytes(b"proj\xff"));
    fs::create_dir(&odd).unwrap();

    let mut registry = sandbox.registry();
    for _ in 0..2 {
        let err = registry.add(&odd).unwrap_err();
        assert!(matches!(err, StoreError::Path(PathError::Unsupported { .. })), "{err:?}");
    }
    assert!(matches!(
        registry.get(&odd),
        Err(StoreError::Path(PathError::Unsupported { .. }))
    ));
    assert!(registry.list().unwrap().is_empty());
}

#[test]
fn test_priority_ordering() {
    let sandbox = Sandbox::new();
    let a = sandbox.dir("a");
    let b = sandbox.dir("b");
    let c = sandbox.dir("c");

    let mut registry = sandbox.registry();
    for dir in [&b, &a, &c] {
        registry.add(dir).unwrap();
    }
    for _ in 0..3 {
        registry.get(&a).unwrap();
    }
    registry.get(&b).unwrap();

    let order: Vec<_> = registry
        .list()
        .unwrap()
        .into_iter()
        .map(|p| p.path().as_path().to_path_buf())
        .collect();
    assert_eq!(order, [a, b, c]);
}

#[test]
fn test_ties_keep_registration_order_after_reload() {
    let sandbox = Sandbox::new();
    let names = ["zeta", "alpha", "mid"];
    {
        let mut registry = sandbox.registry();
        for name in names {
            registry.add(sandbox.dir(name)).unwrap();
        }
    }

    let registry = sandbox.registry();
    let listed: Vec<_> = registry.list().unwrap().iter().map(|p| p.name()).collect();
    assert_eq!(listed, names);
}

#[test]
fn test_blacklist_exclusivity() {
    let sandbox = Sandbox::new();
    let proj = sandbox.dir("proj");
    let other = sandbox.dir("other");

    let mut registry = sandbox.registry();
    registry.set_blacklisted(&proj, true).unwrap();
    assert!(matches!(
        registry.add(&proj),
        Err(StoreError::Blacklisted { .. })
    ));

    registry.add(&other).unwrap();
    registry.set_blacklisted(&other, true).unwrap();
    assert!(registry.list().unwrap().is_empty());
    assert!(registry.search("other").unwrap().is_empty());
    assert!(registry.contains(&other).unwrap());

    registry.set_blacklisted(&other, false).unwrap();
    assert_eq!(registry.list().unwrap().len(), 1);
}

#[test]
fn test_idempotent_removal() {
    let sandbox = Sandbox::new();
    let proj = sandbox.dir("proj");

    let mut registry = sandbox.registry();
    registry.add(&proj).unwrap();
    assert!(registry.remove(&proj).unwrap());
    let after_first = registry.list().unwrap();
    assert!(!registry.remove(&proj).unwrap());
    assert_eq!(registry.list().unwrap(), after_first);
}

#[test]
fn test_duplicate_add() {
    let sandbox = Sandbox::new();
    let proj = sandbox.dir("proj");
    sandbox.file("proj/README.md");

    let mut registry = sandbox.registry();
    registry.add(&proj).unwrap();
    assert!(matches!(
        registry.add(sandbox.path("proj/README.md")),
        Err(StoreError::AlreadyExists { .. })
    ));
}

#[test]
fn test_unloaded_registry() {
    let sandbox = Sandbox::new();
    let mut registry = Registry::new(DatabaseConfig::new(sandbox.database_path()));
    assert!(matches!(registry.list(), Err(StoreError::NotInitialized)));
    assert!(matches!(
        registry.add(sandbox.root()),
        Err(StoreError::NotInitialized)
    ));
}

#[test]
fn test_update_validation_order() {
    let sandbox = Sandbox::new();
    let unregistered = sandbox.dir("unregistered");
    let mut registry = sandbox.registry();

    assert!(matches!(
        registry.update_field(&unregistered, "colour", "blue"),
        Err(StoreError::UnknownField { .. })
    ));
    assert!(matches!(
        registry.update_field(&unregistered, "priority", "high"),
        Err(StoreError::InvalidValue { .. })
    ));
    assert!(matches!(
        registry.update_field(&unregistered, "priority", "4"),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn test_missing_path_surfaces_path_error() {
    let sandbox = Sandbox::new();
    let mut registry = sandbox.registry();

    let err = registry.get(sandbox.path("never-created")).unwrap_err();
    assert!(matches!(err, StoreError::Path(PathError::NotFound { .. })));
}

#[test]
fn test_prune_removes_deleted_directories() {
    let sandbox = Sandbox::new();
    let keep = sandbox.dir("keep");
    let gone = sandbox.dir("gone");

    let mut registry = sandbox.registry();
    registry.add(&keep).unwrap();
    registry.add(&gone).unwrap();
    fs::remove_dir(&gone).unwrap();

    assert_eq!(registry.prune().unwrap(), [gone]);
    assert!(registry.prune().unwrap().is_empty());

    let reloaded = sandbox.registry();
    assert_eq!(reloaded.list().unwrap().len(), 1);
}

#[test]
fn test_search_matches_kind_and_priority() {
    let sandbox = Sandbox::new();
    let api = sandbox.dir("api");
    let web = sandbox.dir("web");

    let mut registry = sandbox.registry();
    registry.add(&api).unwrap();
    registry.add(&web).unwrap();
    registry.update_field(&api, "kind", "golang-service").unwrap();
    registry.update_field(&web, "priority", "9876543").unwrap();

    let by_kind = registry.search("golang-service").unwrap();
    assert_eq!(by_kind.len(), 1);
    assert_eq!(by_kind[0].name(), "api");

    let by_priority = registry.search("9876543").unwrap();
    assert_eq!(by_priority.len(), 1);
    assert_eq!(by_priority[0].name(), "web");
}

#[test]
fn test_corrupt_state_file_is_reported() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.path("state")).unwrap();
    fs::write(sandbox.database_path(), "not a database").unwrap();

    let mut registry = Registry::new(DatabaseConfig::new(sandbox.database_path()));
    let err = registry.load().unwrap_err();
    assert!(err.is_io_failure(), "{err:?}");
}
