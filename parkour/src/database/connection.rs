//! Database connection management.
//!
//! The state lives in a single SQLite file. Rollback journaling
//! (`journal_mode = DELETE`) keeps it a single file at rest, and every write
//! goes through an `IMMEDIATE` transaction so readers never see a partial
//! replacement.

use rusqlite::{Connection, OpenFlags};

use crate::error::StoreError;

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// # Examples
///
/// ```no_run
/// use parkour::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/parkour.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Select rollback journaling and the busy timeout
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened or its directory created
    /// - PRAGMA settings cannot be applied
    /// - The schema version is not the one this library writes
    pub fn open(config: DatabaseConfig) -> Result<Self, StoreError> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;
        conn.busy_timeout(config.busy_timeout)?;

        // journal_mode reports the resulting mode as a row
        let _: String = conn.query_row("PRAGMA journal_mode = DELETE", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = FULL")?;
        super::migrations::check_schema_compatibility(&conn)?;

        log::trace!("opened state database {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// The configuration this connection was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
