//! Filesystem access used by canonicalization and root resolution.
//!
//! Everything the core needs from the filesystem goes through the
//! [`FileSystem`] trait so that error paths (unreadable directories, device
//! nodes, the filesystem root) can be exercised without touching the real
//! machine.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The type of object found at a path after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else: device nodes, sockets, FIFOs.
    Other,
}

/// Filesystem operations consumed by the core.
///
/// # Examples
///
/// ```no_run
/// use parkour::path::{EntryKind, FileSystem, OsFileSystem};
/// use std::path::Path;
///
/// let fs = OsFileSystem;
/// assert_eq!(fs.entry_kind(Path::new("/")).unwrap(), EntryKind::Directory);
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// The process's current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is missing or unreadable.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// The user's home directory, if one can be determined.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Resolve every symlink in an absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or cannot be inspected.
    fn real_path(&self, path: &Path) -> io::Result<PathBuf>;

    /// Classify the object at `path`, following symlinks.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be stat'ed.
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// List the names of the immediate entries of a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or any of its entries cannot be read.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn current_dir(&self) -> io::Result<PathBuf> {
        (**self).current_dir()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        (**self).home_dir()
    }

    fn real_path(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).real_path(path)
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        (**self).entry_kind(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_dir(path)
    }
}

/// The real filesystem, backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home::home_dir()
    }

    fn real_path(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = fs::metadata(path)?;
        Ok(if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }
}
