//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, registry access, and output formatting.

use crate::error::CliError;
use parkour::config::{Config, ConfigBuilder};
use parkour::{canonicalize, CanonicalPath, Registry, RootResolver};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the directory holding `config.yaml`.
    pub config_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u64>,
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration file
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_config(Config {
        data_dir: global.data_dir.clone(),
        busy_timeout_seconds: global.busy_timeout,
        ..Default::default()
    });
    if let Some(dir) = &global.config_dir {
        builder = builder.with_config_dir(dir);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Open and load the registry described by `config`.
pub fn open_registry(config: &Config) -> Result<Registry, CliError> {
    let db_config = config
        .database_config()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let mut registry = Registry::new(db_config);
    registry.load()?;
    Ok(registry)
}

/// Resolver configured from `config`.
pub fn resolver(config: &Config) -> RootResolver {
    RootResolver::from_config(config)
}

/// Canonicalize a path argument, using the current directory if absent.
pub fn resolve_start(path: Option<&Path>) -> Result<CanonicalPath, CliError> {
    Ok(canonicalize(path.unwrap_or_else(|| Path::new("")))?)
}

/// The path argument, or the current directory when absent.
///
/// Registry lookups canonicalize on their own; this keeps `~` and relative
/// forms intact for them.
pub fn path_or_current(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_default()
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Local};
    let dt: DateTime<Local> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            if relative.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
