//! Upward search for the nearest directory carrying a root indicator.

use std::path::PathBuf;

use log::{debug, trace};

use crate::config::Config;
use crate::error::ResolveError;
use crate::path::{CanonicalPath, FileSystem, OsFileSystem};
use crate::root::indicator::{IndicatorSet, Tier};

/// Default number of levels examined above the start path.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// The outcome of a successful root search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    /// The matched ancestor (or the start path itself).
    pub path: CanonicalPath,
    /// The category name of the winning indicator.
    pub kind: String,
    /// The tier the winning indicator belongs to.
    pub tier: Tier,
}

/// Walks the ancestry of a canonical path looking for root indicators.
///
/// Each level is listed once. Its entry names are checked against the
/// version-control tier, then workspace, then language. The search stops
/// without a match when the next parent would be the filesystem root, the
/// home directory (unless disabled), a configured stop directory, or when
/// the depth bound is exhausted.
///
/// # Examples
///
/// ```no_run
/// use parkour::path::canonicalize;
/// use parkour::root::RootResolver;
///
/// let start = canonicalize("~/src/parkour/parkour/src").unwrap();
/// let root = RootResolver::new().resolve(&start).unwrap();
/// println!("{} ({})", root.path, root.kind);
/// ```
#[derive(Debug, Clone)]
pub struct RootResolver<F = OsFileSystem> {
    fs: F,
    indicators: IndicatorSet,
    max_depth: usize,
    stop_at_home: bool,
    stop_dirs: Vec<PathBuf>,
}

impl RootResolver<OsFileSystem> {
    /// A resolver over the real filesystem with the built-in indicators.
    #[must_use]
    pub fn new() -> Self {
        Self::with_file_system(OsFileSystem)
    }

    /// A resolver over the real filesystem configured from `config`.
    ///
    /// Indicators from the configuration are appended after the built-ins
    /// of their tier.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_indicators(config.indicator_set())
            .with_max_depth(config.effective_max_depth())
            .with_stop_at_home(config.effective_stop_at_home())
    }
}

impl Default for RootResolver<OsFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> RootResolver<F> {
    /// A resolver over the given filesystem with the built-in indicators.
    pub fn with_file_system(fs: F) -> Self {
        Self {
            fs,
            indicators: IndicatorSet::builtin(),
            max_depth: DEFAULT_MAX_DEPTH,
            stop_at_home: true,
            stop_dirs: Vec::new(),
        }
    }

    /// Replace the indicator tables.
    #[must_use]
    pub fn with_indicators(mut self, indicators: IndicatorSet) -> Self {
        self.indicators = indicators;
        self
    }

    /// Set how many levels above the start may be examined.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether reaching the home directory ends the search.
    #[must_use]
    pub fn with_stop_at_home(mut self, stop_at_home: bool) -> Self {
        self.stop_at_home = stop_at_home;
        self
    }

    /// Extra directories that end the search when reached from below.
    #[must_use]
    pub fn with_stop_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.stop_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// The indicator tables in use.
    #[must_use]
    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    /// How many levels above the start path are examined.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether the home directory ends the search.
    #[must_use]
    pub const fn stop_at_home(&self) -> bool {
        self.stop_at_home
    }

    /// Find the nearest ancestor of `start` (inclusive) carrying an indicator.
    ///
    /// # Errors
    ///
    /// - `NoProjectRoot` if the search terminates without a match
    /// - `ReadFailure` if any directory on the way cannot be listed
    pub fn resolve(&self, start: &CanonicalPath) -> Result<ResolvedRoot, ResolveError> {
        let home = self.home_boundary();
        let mut current = start.clone();
        let mut depth = 0;

        loop {
            trace!("examining {current} at depth {depth}");
            let entries =
                self.fs
                    .list_dir(current.as_path())
                    .map_err(|source| ResolveError::ReadFailure {
                        path: current.as_path().to_path_buf(),
                        source,
                    })?;

            if let Some((tier, indicator)) = self.indicators.find_match(&entries) {
                debug!(
                    "resolved {start} to {current} via {} ({tier})",
                    indicator.category()
                );
                return Ok(ResolvedRoot {
                    kind: indicator.category().to_string(),
                    path: current,
                    tier,
                });
            }

            let Some(parent) = current.parent() else {
                break;
            };
            if parent.is_root()
                || home.as_ref().is_some_and(|h| h == parent.as_path())
                || self.stop_dirs.iter().any(|d| d == parent.as_path())
                || depth >= self.max_depth
            {
                break;
            }

            current = parent;
            depth += 1;
        }

        debug!("no project root above {start}");
        Err(ResolveError::NoProjectRoot {
            start: start.as_path().to_path_buf(),
        })
    }

    fn home_boundary(&self) -> Option<PathBuf> {
        if !self.stop_at_home {
            return None;
        }
        let home = self.fs.home_dir()?;
        Some(self.fs.real_path(&home).unwrap_or(home))
    }
}
