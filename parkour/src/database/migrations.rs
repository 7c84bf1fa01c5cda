//! Database schema management and version checks.

use rusqlite::Connection;

use crate::error::StoreError;

use super::schema::{
    CREATE_BLACKLIST_TABLE, CREATE_METADATA_TABLE, CREATE_POSITION_INDEX, CREATE_PROJECTS_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables and indices and records the schema version. Should
/// only be called on a database that has not been initialized yet.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use parkour::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_PROJECTS_TABLE, [])?;
    conn.execute(CREATE_BLACKLIST_TABLE, [])?;
    conn.execute(CREATE_POSITION_INDEX, [])?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    Ok(())
}

/// Gets the schema version recorded in the database.
///
/// Returns `0` for a database with no metadata table or no version row.
///
/// # Errors
///
/// Returns `Corrupt` if the stored version is not a number, or a database
/// error for any other failure.
pub fn get_schema_version(conn: &Connection) -> Result<i32, StoreError> {
    let has_metadata: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| row.get::<_, String>(0)) {
        Ok(value) => value.parse::<i32>().map_err(|_| StoreError::Corrupt {
            details: format!("schema version is not a number: {value}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Fails unless the database is at exactly the current schema version.
///
/// # Errors
///
/// Returns `UnsupportedSchemaVersion` for any other version.
pub fn ensure_current_version(conn: &Connection) -> Result<(), StoreError> {
    let found = get_schema_version(conn)?;
    if found == CURRENT_SCHEMA_VERSION {
        Ok(())
    } else {
        Err(StoreError::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found,
        })
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// 1. Version 0 (fresh file): initialize the schema
/// 2. Current version: nothing to do
/// 3. Anything else: `UnsupportedSchemaVersion`
///
/// # Errors
///
/// Returns an error if the version is incompatible or initialization fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<(), StoreError> {
    if get_schema_version(conn)? == 0 {
        log::debug!("initializing state schema v{CURRENT_SCHEMA_VERSION}");
        initialize_schema(conn)?;
        return Ok(());
    }
    ensure_current_version(conn)
}
