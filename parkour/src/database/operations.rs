//! Reading and writing the full registry state.
//!
//! The registry is small, so every write replaces the whole state inside a
//! single `IMMEDIATE` transaction. Mutations read the current state inside
//! that same transaction, so concurrent writers serialize on the lock
//! instead of overwriting each other.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::{PathError, StoreError};
use crate::path::CanonicalPath;
use crate::project::Project;

use super::connection::Database;
use super::schema::{INSERT_BLACKLIST, INSERT_PROJECT, SELECT_BLACKLIST, SELECT_PROJECTS};

/// Everything the registry persists.
///
/// `projects` is in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    /// Registered projects in insertion order.
    pub projects: Vec<Project>,
    /// Canonical paths that may not be registered.
    pub blacklist: BTreeSet<PathBuf>,
}

#[allow(clippy::cast_possible_wrap)]
fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64, StoreError> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|e| StoreError::Corrupt {
            details: format!("timestamp before Unix epoch: {e}"),
        })
}

#[allow(clippy::cast_sign_loss)]
fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

fn corrupt(details: impl Into<String>) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(StoreError::Corrupt {
        details: details.into(),
    }))
}

fn decode_command(column: &str, json: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(json).map_err(|e| corrupt(format!("{column} is not a JSON list: {e}")))
}

fn encode_command(args: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(args).map_err(|e| StoreError::Corrupt {
        details: format!("cannot encode command: {e}"),
    })
}

/// Expects columns: path, kind, priority, build, run, test, added, visited.
fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    let path: String = row.get(0)?;
    let path = PathBuf::from(path);
    if !path.is_absolute() {
        return Err(corrupt(format!(
            "stored project path is not absolute: {}",
            path.display()
        )));
    }

    let priority: i64 = row.get(2)?;
    let priority = u64::try_from(priority)
        .map_err(|_| corrupt(format!("negative priority {priority}")))?;

    let build_command = decode_command("build_command", &row.get::<_, String>(3)?)?;
    let run_command = decode_command("run_command", &row.get::<_, String>(4)?)?;
    let test_command = decode_command("test_command", &row.get::<_, String>(5)?)?;
    let added_at: i64 = row.get(6)?;
    let last_visited_at: Option<i64> = row.get(7)?;

    Ok(Project::builder(CanonicalPath::from_resolved(path))
        .kind(row.get(1)?)
        .priority(priority)
        .build_command(build_command)
        .run_command(run_command)
        .test_command(test_command)
        .added_at(unix_secs_to_systemtime(added_at))
        .last_visited_at(last_visited_at.map(unix_secs_to_systemtime))
        .build())
}

/// Surface decode failures raised inside row mappers as `Corrupt`.
fn lift(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::ToSqlConversionFailure(inner) => match inner.downcast::<StoreError>() {
            Ok(store) => *store,
            Err(other) => StoreError::Database(rusqlite::Error::ToSqlConversionFailure(other)),
        },
        other => StoreError::Database(other),
    }
}

/// Reads the full state through any connection or transaction.
///
/// # Errors
///
/// Returns `Corrupt` if a row cannot be decoded, or a database error.
pub fn read_state(conn: &Connection) -> Result<RegistrySnapshot, StoreError> {
    let mut stmt = conn.prepare(SELECT_PROJECTS)?;
    let projects = stmt
        .query_map([], row_to_project)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(lift)?;

    let mut stmt = conn.prepare(SELECT_BLACKLIST)?;
    let blacklist = stmt
        .query_map([], |row| row.get::<_, String>(0).map(PathBuf::from))?
        .collect::<rusqlite::Result<BTreeSet<_>>>()?;

    Ok(RegistrySnapshot {
        projects,
        blacklist,
    })
}

/// Stored paths are TEXT; a non-UTF-8 path would not survive the round trip.
pub(crate) fn path_text(path: &Path) -> Result<&str, StoreError> {
    path.to_str().ok_or_else(|| {
        StoreError::Path(PathError::Unsupported {
            path: path.to_path_buf(),
            reason: "path is not valid UTF-8".to_string(),
        })
    })
}

fn replace_state(conn: &Connection, state: &RegistrySnapshot) -> Result<(), StoreError> {
    conn.execute("DELETE FROM projects", [])?;
    conn.execute("DELETE FROM blacklist", [])?;

    let mut insert = conn.prepare(INSERT_PROJECT)?;
    for (position, project) in state.projects.iter().enumerate() {
        let priority =
            i64::try_from(project.priority()).map_err(|_| StoreError::InvalidValue {
                field: "priority".to_string(),
                value: project.priority().to_string(),
                reason: "too large to store".to_string(),
            })?;
        let last_visited = project
            .last_visited_at()
            .map(systemtime_to_unix_secs)
            .transpose()?;
        insert.execute(params![
            path_text(project.path().as_path())?,
            i64::try_from(position).unwrap_or(i64::MAX),
            project.kind(),
            priority,
            encode_command(project.build_command())?,
            encode_command(project.run_command())?,
            encode_command(project.test_command())?,
            systemtime_to_unix_secs(project.added_at())?,
            last_visited,
        ])?;
    }

    let mut insert = conn.prepare(INSERT_BLACKLIST)?;
    for path in &state.blacklist {
        insert.execute([path_text(path)?])?;
    }
    Ok(())
}

impl Database {
    /// Reads the full state.
    ///
    /// # Errors
    ///
    /// Returns `Corrupt` if a row cannot be decoded, or a database error.
    pub fn load_state(&self) -> Result<RegistrySnapshot, StoreError> {
        read_state(&self.conn)
    }

    /// Replaces the stored state with `state` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or committed,
    /// or any write fails. Nothing is changed on error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parkour::database::{Database, DatabaseConfig, RegistrySnapshot};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/parkour.db")).unwrap();
    /// db.save_state(&RegistrySnapshot::default()).unwrap();
    /// assert!(db.load_state().unwrap().projects.is_empty());
    /// ```
    pub fn save_state(&mut self, state: &RegistrySnapshot) -> Result<(), StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        replace_state(&tx, state)?;
        tx.commit()?;
        log::trace!(
            "saved {} projects, {} blacklisted",
            state.projects.len(),
            state.blacklist.len()
        );
        Ok(())
    }

    /// Read-modify-write under one exclusive transaction.
    ///
    /// `mutate` receives the current stored state. If it returns `Ok`, the
    /// modified state is written (only when it differs from what was read)
    /// and returned together with the closure's value. If it returns `Err`,
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or any database error.
    pub fn update_state<T, F>(&mut self, mutate: F) -> Result<(RegistrySnapshot, T), StoreError>
    where
        F: FnOnce(&mut RegistrySnapshot) -> Result<T, StoreError>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut state = read_state(&tx)?;
        let before = state.clone();
        let value = mutate(&mut state)?;
        if state != before {
            replace_state(&tx, &state)?;
        }
        tx.commit()?;
        Ok((state, value))
    }
}
