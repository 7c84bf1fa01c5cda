//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak the developer's setup into tests.
const ISOLATED_VARS: [&str; 6] = [
    "PARKOUR_DATA_DIR",
    "PARKOUR_CONFIG_DIR",
    "PARKOUR_BUSY_TIMEOUT",
    "PARKOUR_MAX_DEPTH",
    "PARKOUR_STOP_AT_HOME",
    "PARKOUR_LOG_MODE",
];

/// Test environment with isolated data and config directories.
///
/// `HOME` points at the temporary directory, so root searches never climb
/// above it.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory, symlinks resolved
    pub temp_path: PathBuf,
    /// Path to the parkour data directory
    pub data_dir: PathBuf,
    /// Directory searched for config.yaml
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; `pk` creates it on first write.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let data_dir = temp_path.join("pk-data");
        let config_dir = temp_path.join("pk-config");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            temp_path,
            data_dir,
            config_dir,
        }
    }

    /// A bare `pk` command with an isolated environment but no data dir flag.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("pk").expect("Failed to find pk binary");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.temp_path)
            .env("PARKOUR_CONFIG_DIR", &self.config_dir)
            .current_dir(&self.temp_path);
        cmd
    }

    /// A `pk` command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create an empty file (and its parents) in the test environment.
    pub fn create_file(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create parent");
        std::fs::write(&path, "").expect("Failed to create test file");
        path
    }

    /// Create a directory carrying a `.git` marker.
    pub fn create_git_project(&self, name: &str) -> PathBuf {
        let path = self.create_dir(name);
        std::fs::create_dir_all(path.join(".git")).expect("Failed to create .git");
        path
    }

    /// Write config.yaml into the config directory.
    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.config_dir.join("config.yaml"), yaml).expect("Failed to write config");
    }

    /// Run `pk add --exact PATH` and assert success.
    pub fn add_exact(&self, path: &Path) {
        self.command()
            .arg("add")
            .arg("--exact")
            .arg(path)
            .assert()
            .success();
    }

    /// Run `pk get PATH` and assert success.
    pub fn visit(&self, path: &Path) {
        self.command().arg("get").arg(path).assert().success();
    }

    /// Run a command and return its stdout, asserting success.
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run pk");
        assert!(
            output.status.success(),
            "pk {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// `pk list --format json` parsed.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let out = self.stdout(&["list", "--format", "json"]);
        serde_json::from_str(&out).expect("list output is not JSON")
    }

    /// Paths from `pk list`, in listing order.
    pub fn listed_paths(&self) -> Vec<String> {
        self.list_json()
            .iter()
            .map(|p| p["path"].as_str().unwrap().to_string())
            .collect()
    }
}

/// Path as printed by `pk`.
#[allow(dead_code)]
pub fn shown(path: &Path) -> String {
    path.display().to_string()
}
