//! Core types for path handling.

use std::fmt;
use std::path::{Path, PathBuf};

/// An absolute, cleaned, symlink-free path to an existing directory.
///
/// Values are only produced by [`canonicalize`](crate::path::canonicalize())
/// or derived from another canonical path (its ancestors are canonical too),
/// so holding one means the path was a real directory when it was built.
/// Nothing is cached: the directory may disappear afterwards.
///
/// # Examples
///
/// ```no_run
/// use parkour::path::canonicalize;
///
/// let here = canonicalize("").unwrap();
/// assert!(here.as_path().is_absolute());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalPath(PathBuf);

impl CanonicalPath {
    /// Wrap a path the caller has already resolved.
    pub(crate) fn from_resolved(path: PathBuf) -> Self {
        Self(path)
    }

    /// Get a reference to the path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert into the underlying `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// The last path segment, or the whole path for the filesystem root.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parkour::path::canonicalize;
    ///
    /// let root = canonicalize("/").unwrap();
    /// assert_eq!(root.name(), "/");
    /// ```
    #[must_use]
    pub fn name(&self) -> String {
        self.0.file_name().map_or_else(
            || self.0.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// The parent directory, or `None` at the filesystem root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|p| Self(p.to_path_buf()))
    }

    /// Whether this is the filesystem root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.parent().is_none()
    }
}

impl AsRef<Path> for CanonicalPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<CanonicalPath> for PathBuf {
    fn from(path: CanonicalPath) -> Self {
        path.0
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
