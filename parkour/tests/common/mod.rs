//! Common test utilities for integration tests.
//!
//! Every fixture lives in its own temporary directory; resolvers built here
//! stop at that directory so nothing above it influences a search.

use std::fs;
use std::path::{Path, PathBuf};

use parkour::database::DatabaseConfig;
use parkour::{canonicalize, CanonicalPath, Registry, RootResolver};

/// A temporary directory tree for one test.
pub struct Sandbox {
    _dir: tempfile::TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl Sandbox {
    /// Creates an empty sandbox.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        Self { _dir: dir, root }
    }

    /// The sandbox directory, symlinks resolved.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `rel` inside the sandbox.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Creates the directory `rel` (and its parents).
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates an empty file at `rel`, creating parent directories.
    pub fn file(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    /// Canonical form of `rel`.
    pub fn canonical(&self, rel: &str) -> CanonicalPath {
        canonicalize(self.path(rel)).unwrap()
    }

    /// A resolver confined to the sandbox.
    pub fn resolver(&self) -> RootResolver {
        RootResolver::new()
            .with_stop_at_home(false)
            .with_stop_dirs([self.root.clone()])
    }

    /// Location of the state database.
    pub fn database_path(&self) -> PathBuf {
        self.root.join("state").join("parkour.db")
    }

    /// A loaded registry backed by [`database_path`](Self::database_path).
    pub fn registry(&self) -> Registry {
        let mut registry = Registry::new(DatabaseConfig::new(self.database_path()));
        registry.load().unwrap();
        registry
    }
}
