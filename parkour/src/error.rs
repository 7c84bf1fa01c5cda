//! Error types for the parkour library.
//!
//! Each component has its own error enum so callers can match on the
//! outcomes they care about: [`PathError`] from canonicalization,
//! [`ResolveError`] from root resolution and [`StoreError`] from the project
//! registry. [`Error`] unifies them for callers that just want to propagate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a parkour error.
///
/// # Examples
///
/// ```
/// use parkour::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while canonicalizing a user-supplied path.
#[derive(Debug, Error)]
pub enum PathError {
    /// The path does not exist after symlink resolution.
    #[error("path not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The path names something that is neither a regular file nor a directory.
    #[error("unsupported path {}: {reason}", path.display())]
    Unsupported {
        /// The offending path.
        path: PathBuf,
        /// Why the path cannot be used.
        reason: String,
    },

    /// Permission denied while inspecting the path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// Any other I/O failure while inspecting the path.
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        /// The path being inspected.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl PathError {
    /// Classify an I/O error raised while inspecting `path`.
    #[must_use]
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source: err },
        }
    }
}

/// Errors produced by the root resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No ancestor of the start path carries a root indicator.
    ///
    /// This is an expected outcome; callers pick their own fallback.
    #[error("no project root found above {}", start.display())]
    NoProjectRoot {
        /// The path the search started from.
        start: PathBuf,
    },

    /// A directory listing failed part way up the ancestor chain.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailure {
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors produced by the project registry.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An operation was attempted before `load()`.
    #[error("registry has not been loaded")]
    NotInitialized,

    /// The project is already registered.
    #[error("project already exists: {}", path.display())]
    AlreadyExists {
        /// The canonical path of the existing project.
        path: PathBuf,
    },

    /// The path is blacklisted and cannot be registered.
    #[error("path is blacklisted: {}", path.display())]
    Blacklisted {
        /// The blacklisted canonical path.
        path: PathBuf,
    },

    /// No project is registered at the path.
    #[error("project not found: {}", path.display())]
    NotFound {
        /// The canonical path that was looked up.
        path: PathBuf,
    },

    /// The field name does not name an updatable project field.
    #[error("unknown field '{field}'")]
    UnknownField {
        /// The unrecognized field name.
        field: String,
    },

    /// The value could not be parsed for the given field.
    #[error("invalid value '{value}' for field '{field}': {reason}")]
    InvalidValue {
        /// The field being updated.
        field: String,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The path argument could not be canonicalized.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The state file was written by a newer or older schema.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The schema version this build understands.
        expected: i32,
        /// The schema version found in the state file.
        found: i32,
    },

    /// The state file contains data that cannot be decoded.
    #[error("corrupt state: {details}")]
    Corrupt {
        /// Details about the corruption.
        details: String,
    },
}

impl StoreError {
    /// Check if the error comes from the storage layer rather than from
    /// registry semantics.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkour::StoreError;
    ///
    /// assert!(!StoreError::NotInitialized.is_io_failure());
    /// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    /// assert!(StoreError::from(io).is_io_failure());
    /// ```
    #[must_use]
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Io(_)
                | Self::UnsupportedSchemaVersion { .. }
                | Self::Corrupt { .. }
        )
    }

    /// Check if the database stayed locked for the whole busy timeout.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::DatabaseBusy
        )
    }
}

/// The main error type for the parkour library.
#[derive(Debug, Error)]
pub enum Error {
    /// Canonicalization failed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Root resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A registry operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error means "no project root was found".
    ///
    /// # Examples
    ///
    /// ```
    /// use parkour::{Error, ResolveError};
    /// use std::path::PathBuf;
    ///
    /// let err = Error::from(ResolveError::NoProjectRoot { start: PathBuf::from("/tmp") });
    /// assert!(err.is_no_project_root());
    /// ```
    #[must_use]
    pub fn is_no_project_root(&self) -> bool {
        matches!(self, Self::Resolve(ResolveError::NoProjectRoot { .. }))
    }

    /// Check if error indicates a path does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Path(PathError::NotFound { .. })
                | Self::Store(StoreError::Path(PathError::NotFound { .. }))
        )
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::Path(PathError::PermissionDenied { .. })
                | Self::Store(StoreError::Path(PathError::PermissionDenied { .. }))
        )
    }
}
