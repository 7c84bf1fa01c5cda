#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # parkour
//!
//! A library for locating project roots and tracking visited projects.
//!
//! ## Core Types
//!
//! - [`CanonicalPath`] and [`canonicalize`]: absolute, symlink-free directory paths
//! - [`RootResolver`] and [`ResolvedRoot`]: upward search for root indicators
//! - [`Registry`] and [`Project`]: the persisted project collection
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use parkour::{canonicalize, RootResolver};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::create_dir(dir.path().join(".git")).unwrap();
//! std::fs::create_dir_all(dir.path().join("src/bin")).unwrap();
//!
//! let start = canonicalize(dir.path().join("src/bin")).unwrap();
//! let root = RootResolver::new().resolve(&start).unwrap();
//! assert_eq!(root.kind, "git");
//! assert_eq!(root.path, canonicalize(dir.path()).unwrap());
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod path;
pub mod project;
pub mod registry;
pub mod root;

pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, PathError, ResolveError, Result, StoreError};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{canonicalize, CanonicalPath};
pub use project::{FieldUpdate, Project, ProjectBuilder, ProjectField, MAX_PRIORITY};
pub use registry::Registry;
pub use root::{IndicatorSet, ResolvedRoot, RootResolver, Tier};
