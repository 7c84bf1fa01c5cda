//! Integration tests for project-root resolution on a real filesystem.

mod common;

use common::Sandbox;
use parkour::config::{Config, IndicatorConfig, IndicatorEntry};
use parkour::{Error, ResolveError, RootResolver, Tier};

#[test]
fn test_version_control_beats_language() {
    let sandbox = Sandbox::new();
    sandbox.dir("proj/.git");
    sandbox.file("proj/go.mod");

    let root = sandbox.resolver().resolve(&sandbox.canonical("proj")).unwrap();
    assert_eq!(root.kind, "git");
    assert_eq!(root.tier, Tier::VersionControl);
    assert_eq!(root.path, sandbox.canonical("proj"));
}

#[test]
fn test_workspace_beats_language() {
    let sandbox = Sandbox::new();
    sandbox.file("proj/Cargo.toml");

    let root = sandbox.resolver().resolve(&sandbox.canonical("proj")).unwrap();
    assert_eq!(root.tier, Tier::Workspace);
    assert_eq!(root.kind, "cargo-workspace");
}

#[test]
fn test_ancestor_search() {
    let sandbox = Sandbox::new();
    sandbox.file("proj/go.mod");
    sandbox.dir("proj/internal/server/handlers");

    let start = sandbox.canonical("proj/internal/server/handlers");
    let root = sandbox.resolver().resolve(&start).unwrap();
    assert_eq!(root.path, sandbox.canonical("proj"));
    assert_eq!(root.kind, "go");
}

#[test]
fn test_nearest_ancestor_wins_over_stronger_tier_above() {
    let sandbox = Sandbox::new();
    sandbox.dir("mono/.git");
    sandbox.file("mono/services/api/go.mod");

    let root = sandbox
        .resolver()
        .resolve(&sandbox.canonical("mono/services/api"))
        .unwrap();
    assert_eq!(root.path, sandbox.canonical("mono/services/api"));
    assert_eq!(root.kind, "go");
}

#[test]
fn test_suffix_pattern() {
    let sandbox = Sandbox::new();
    sandbox.file("dotnet/App.sln");
    sandbox.dir("dotnet/src");

    let root = sandbox.resolver().resolve(&sandbox.canonical("dotnet/src")).unwrap();
    assert_eq!(root.kind, "dotnet-solution");
    assert_eq!(root.path, sandbox.canonical("dotnet"));
}

#[test]
fn test_no_project_root() {
    let sandbox = Sandbox::new();
    sandbox.dir("plain/deeper");

    let start = sandbox.canonical("plain/deeper");
    match sandbox.resolver().resolve(&start) {
        Err(ResolveError::NoProjectRoot { start: reported }) => {
            assert_eq!(reported, start.as_path());
        }
        other => panic!("expected NoProjectRoot, got {other:?}"),
    }
}

#[test]
fn test_no_project_root_through_crate_error() {
    let sandbox = Sandbox::new();
    sandbox.dir("plain");

    let err: Error = sandbox
        .resolver()
        .resolve(&sandbox.canonical("plain"))
        .unwrap_err()
        .into();
    assert!(err.is_no_project_root());
}

#[test]
fn test_max_depth_limits_search() {
    let sandbox = Sandbox::new();
    sandbox.dir("proj/.git");
    sandbox.dir("proj/a/b/c");

    let start = sandbox.canonical("proj/a/b/c");
    assert!(sandbox.resolver().with_max_depth(2).resolve(&start).is_err());
    assert!(sandbox.resolver().with_max_depth(3).resolve(&start).is_ok());
}

#[test]
fn test_configured_indicators() {
    let sandbox = Sandbox::new();
    sandbox.file("elixir/mix.exs");

    let config = Config {
        stop_at_home: Some(false),
        indicators: Some(IndicatorConfig {
            language: vec![IndicatorEntry {
                category: "elixir".into(),
                patterns: vec!["mix.exs".into()],
                priority: None,
            }],
            ..Default::default()
        }),
        ..Default::default()
    };
    let resolver = RootResolver::from_config(&config).with_stop_dirs([sandbox.root()]);

    let root = resolver.resolve(&sandbox.canonical("elixir")).unwrap();
    assert_eq!(root.kind, "elixir");
    assert_eq!(root.tier, Tier::Language);
}
