//! Project root resolution.
//!
//! A project root is the nearest directory, walking upward from a canonical
//! start path, whose entries include a known marker such as `.git` or
//! `Cargo.toml`. [`RootResolver`] performs the walk using an
//! [`IndicatorSet`] of three ordered tiers.
//!
//! # Examples
//!
//! ```no_run
//! use parkour::path::canonicalize;
//! use parkour::root::RootResolver;
//!
//! let here = canonicalize("").unwrap();
//! match RootResolver::new().resolve(&here) {
//!     Ok(root) => println!("{} is a {} project", root.path, root.kind),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod indicator;
pub mod resolver;

pub use indicator::{Indicator, IndicatorSet, Pattern, Tier};
pub use resolver::{ResolvedRoot, RootResolver, DEFAULT_MAX_DEPTH};
