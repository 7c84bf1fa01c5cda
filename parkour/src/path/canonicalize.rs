//! Turning user input into a canonical project directory.
//!
//! The steps mirror what a shell user expects from "the directory I meant":
//! - Empty input means the current working directory
//! - `~` expands to the home directory, relative paths are joined to the cwd
//! - `.` and `..` are cleaned, then every symlink is resolved
//! - A regular file stands for its parent directory

use std::path::Path;

use crate::error::PathError;
use crate::path::fs::{EntryKind, FileSystem, OsFileSystem};
use crate::path::normalize::{absolutize, expand_tilde_with};
use crate::path::types::CanonicalPath;

/// Canonicalize a path against the real filesystem.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist after symlink resolution (`NotFound`)
/// - The path is neither a regular file nor a directory (`Unsupported`)
/// - Permission is denied while resolving it (`PermissionDenied`)
///
/// # Examples
///
/// ```no_run
/// use parkour::path::canonicalize;
///
/// // A file resolves to the directory containing it
/// let dir = canonicalize("/etc/hosts").unwrap();
/// assert_eq!(dir, canonicalize("/etc").unwrap());
/// ```
pub fn canonicalize(input: impl AsRef<Path>) -> Result<CanonicalPath, PathError> {
    canonicalize_with(&OsFileSystem, input.as_ref())
}

/// Canonicalize a path using the given filesystem.
///
/// # Errors
///
/// See [`canonicalize`].
pub fn canonicalize_with<F>(fs: &F, input: &Path) -> Result<CanonicalPath, PathError>
where
    F: FileSystem + ?Sized,
{
    let cwd = || fs.current_dir().map_err(|e| PathError::from_io(input, e));

    let absolute = if input.as_os_str().is_empty() {
        absolutize(&cwd()?, Path::new("/"))
    } else {
        let expanded = expand_tilde_with(input, fs.home_dir().as_deref())?;
        if expanded.is_absolute() {
            absolutize(&expanded, Path::new("/"))
        } else {
            absolutize(&expanded, &cwd()?)
        }
    };

    let resolved = fs
        .real_path(&absolute)
        .map_err(|e| PathError::from_io(&absolute, e))?;

    let kind = fs
        .entry_kind(&resolved)
        .map_err(|e| PathError::from_io(&resolved, e))?;

    match kind {
        EntryKind::Directory => Ok(CanonicalPath::from_resolved(resolved)),
        EntryKind::File => match resolved.parent() {
            Some(parent) => Ok(CanonicalPath::from_resolved(parent.to_path_buf())),
            None => Err(PathError::Unsupported {
                path: resolved,
                reason: "file has no parent directory".to_string(),
            }),
        },
        EntryKind::Other => Err(PathError::Unsupported {
            path: resolved,
            reason: "not a regular file or directory".to_string(),
        }),
    }
}
