//! SQLite persistence for the project registry.
//!
//! The whole registry (projects in insertion order plus the blacklist) is
//! stored in one database file with a schema version row, and is always
//! read and replaced as a unit.
//!
//! # Examples
//!
//! ```no_run
//! use parkour::database::{Database, DatabaseConfig};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/parkour.db")).unwrap();
//! let (state, ()) = db
//!     .update_state(|state| {
//!         state.blacklist.insert("/tmp".into());
//!         Ok(())
//!     })
//!     .unwrap();
//! assert!(state.blacklist.contains(std::path::Path::new("/tmp")));
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use operations::{read_state, RegistrySnapshot};
pub(crate) use operations::path_text;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
