//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use parkour::Error as LibError;
use parkour::{PathError, ResolveError, StoreError};
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock.
    Timeout,

    /// Configuration error.
    Config(String),

    /// Semantic failure (e.g., project not registered) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (unknown project, no root, blacklisted, duplicate)
    /// - 2: Timeout waiting for database lock
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::Resolve(ResolveError::NoProjectRoot { .. })
                | LibError::Store(
                    StoreError::NotFound { .. }
                    | StoreError::AlreadyExists { .. }
                    | StoreError::Blacklisted { .. },
                ) => 1,
                LibError::Path(PathError::NotFound { .. } | PathError::Unsupported { .. })
                | LibError::Store(
                    StoreError::UnknownField { .. }
                    | StoreError::InvalidValue { .. }
                    | StoreError::Path(PathError::NotFound { .. } | PathError::Unsupported { .. }),
                ) => 4,
                LibError::Io(_) | LibError::Store(StoreError::Io(_)) => 5,
                LibError::Configuration(_) | LibError::Validation { .. } => 7,
                _ => 6,
            },
            CliError::Timeout => 2,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout => write!(f, "Timeout waiting for database lock"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        if matches!(&e, LibError::Store(store) if store.is_busy()) {
            CliError::Timeout
        } else {
            CliError::Library(e)
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        LibError::from(e).into()
    }
}

impl From<ResolveError> for CliError {
    fn from(e: ResolveError) -> Self {
        LibError::from(e).into()
    }
}

impl From<PathError> for CliError {
    fn from(e: PathError) -> Self {
        LibError::from(e).into()
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let missing = CliError::from(StoreError::NotFound {
            path: PathBuf::from("/p"),
        });
        assert_eq!(missing.exit_code(), 1);

        let field = CliError::from(StoreError::UnknownField {
            field: "colour".into(),
        });
        assert_eq!(field.exit_code(), 4);

        let no_root = CliError::from(ResolveError::NoProjectRoot {
            start: PathBuf::from("/p"),
        });
        assert_eq!(no_root.exit_code(), 1);

        assert_eq!(CliError::Config("bad".into()).exit_code(), 7);
        assert_eq!(CliError::Timeout.exit_code(), 2);
    }

    #[test]
    fn test_busy_becomes_timeout() {
        let busy = StoreError::Database(busy_error());
        assert!(matches!(CliError::from(busy), CliError::Timeout));
    }

    fn busy_error() -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        )
    }
}
