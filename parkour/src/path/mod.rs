//! Path canonicalization and the filesystem seam.
//!
//! Every path that reaches the resolver or the registry goes through
//! [`canonicalize`] first, which produces a [`CanonicalPath`]: absolute,
//! cleaned, symlink-free and always a directory.
//!
//! - [`normalize`] holds the lexical steps (tilde expansion, `.`/`..`
//!   cleaning) that never follow symlinks.
//! - [`fs`] defines the [`FileSystem`] trait the rest of the crate reads the
//!   disk through, with [`OsFileSystem`] as the real implementation.
//!
//! # Examples
//!
//! ```no_run
//! use parkour::path::canonicalize;
//!
//! let project = canonicalize("~/src/parkour/README.md").unwrap();
//! assert!(project.as_path().ends_with("parkour"));
//! ```

pub mod canonicalize;
pub mod fs;
pub mod normalize;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use canonicalize::{canonicalize, canonicalize_with};
pub use fs::{EntryKind, FileSystem, OsFileSystem};
pub use types::CanonicalPath;
