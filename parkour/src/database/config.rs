//! Database configuration and location of the state file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable naming the directory that holds the state file.
pub const DATA_DIR_ENV: &str = "PARKOUR_DATA_DIR";

/// File name of the state database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "parkour.db";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use parkour::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/parkour.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to create the file (and its directory) if it doesn't exist.
    pub auto_create: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }
}

/// Returns the default data directory, `~/.local/state/parkour`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "cannot determine home directory".into(),
    })?;
    Ok(home.join(".local").join("state").join("parkour"))
}

/// Resolves the data directory.
///
/// 1. `$PARKOUR_DATA_DIR` if set and non-empty
/// 2. [`default_data_dir`] otherwise
///
/// # Errors
///
/// Returns an error if the home directory is needed but unknown.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Resolves the state database path inside [`resolve_data_dir`].
///
/// # Errors
///
/// Returns an error if the home directory is needed but unknown.
///
/// # Examples
///
/// ```no_run
/// use parkour::database::resolve_database_path;
///
/// let db_path = resolve_database_path().unwrap();
/// assert!(db_path.ends_with("parkour.db"));
/// ```
pub fn resolve_database_path() -> Result<PathBuf> {
    Ok(resolve_data_dir()?.join(DATABASE_FILE_NAME))
}
