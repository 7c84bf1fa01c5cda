//! Lexical path normalization.
//!
//! These functions never touch the filesystem beyond looking up the home
//! and current directories:
//! - Expanding tilde (~) to the home directory
//! - Converting relative paths to absolute paths
//! - Resolving `.` and `..` components

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// Expand tilde (~) using an explicit home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns `Unsupported` if:
/// - The path uses `~user` syntax
/// - The path starts with `~` but no home directory is known
///
/// # Examples
///
/// ```
/// use parkour::path::normalize::expand_tilde_with;
/// use std::path::Path;
///
/// let home = Path::new("/home/u");
/// let expanded = expand_tilde_with(Path::new("~/src"), Some(home)).unwrap();
/// assert_eq!(expanded, Path::new("/home/u/src"));
///
/// let untouched = expand_tilde_with(Path::new("/abs"), Some(home)).unwrap();
/// assert_eq!(untouched, Path::new("/abs"));
/// ```
pub fn expand_tilde_with(path: &Path, home: Option<&Path>) -> Result<PathBuf, PathError> {
    let mut components = path.components();
    let first = match components.next() {
        Some(Component::Normal(first)) if first.to_str().is_some_and(|s| s.starts_with('~')) => {
            first
        }
        _ => return Ok(path.to_path_buf()),
    };

    if first != "~" {
        return Err(PathError::Unsupported {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        });
    }

    let home = home.ok_or_else(|| PathError::Unsupported {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;

    let rest = components.as_path();
    if rest.as_os_str().is_empty() {
        Ok(home.to_path_buf())
    } else {
        Ok(home.join(rest))
    }
}

/// Expand tilde (~) to the current user's home directory.
///
/// # Errors
///
/// See [`expand_tilde_with`].
///
/// # Examples
///
/// ```
/// use parkour::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf, PathError> {
    expand_tilde_with(path, home::home_dir().as_deref())
}

/// Resolve `.` and `..` components in an absolute path.
///
/// A `..` at the root stays at the root, the same way the kernel treats
/// `/..`.
///
/// # Examples
///
/// ```
/// use parkour::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(resolve_components(Path::new("/a/../..")), PathBuf::from("/"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::RootDir => result.push(component),
            Component::Normal(c) => result.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping the root itself is a no-op for PathBuf.
                result.pop();
            }
        }
    }

    result
}

/// Make `path` absolute against `cwd` and clean it.
///
/// # Examples
///
/// ```
/// use parkour::path::normalize::absolutize;
/// use std::path::{Path, PathBuf};
///
/// let cwd = Path::new("/work");
/// assert_eq!(absolutize(Path::new("../x/./y"), cwd), PathBuf::from("/x/y"));
/// assert_eq!(absolutize(Path::new("/etc"), cwd), PathBuf::from("/etc"));
/// ```
#[must_use]
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        resolve_components(path)
    } else {
        resolve_components(&cwd.join(path))
    }
}

/// Normalize a path to absolute form without following symlinks.
///
/// 1. Expands tilde (~) if present
/// 2. Converts relative paths to absolute (using current directory)
/// 3. Resolves `.` and `..` components
///
/// # Errors
///
/// Returns an error if tilde expansion fails or the current directory
/// cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use parkour::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("~/project")).unwrap();
/// assert!(normalized.is_absolute());
///
/// let normalized = normalize(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(normalized, Path::new("/a/c"));
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf, PathError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        return Ok(resolve_components(&expanded));
    }

    let cwd = env::current_dir().map_err(|e| PathError::from_io(path, e))?;
    Ok(absolutize(&expanded, &cwd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_home() {
        let home = home::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~")).unwrap(), home);
    }

    #[test]
    fn test_expand_tilde_with_path() {
        let expanded = expand_tilde_with(Path::new("~/test"), Some(Path::new("/h"))).unwrap();
        assert_eq!(expanded, PathBuf::from("/h/test"));
    }

    #[test]
    fn test_expand_tilde_absolute_unchanged() {
        let path = Path::new("/absolute/path");
        assert_eq!(expand_tilde(path).unwrap(), path);
    }

    #[test]
    fn test_expand_tilde_inside_path_unchanged() {
        let path = Path::new("/a/~/b");
        assert_eq!(expand_tilde_with(path, None).unwrap(), path);
    }

    #[test]
    fn test_expand_tilde_user_syntax_not_supported() {
        let result = expand_tilde_with(Path::new("~user/path"), Some(Path::new("/h")));
        assert!(matches!(result, Err(PathError::Unsupported { .. })));
    }

    #[test]
    fn test_expand_tilde_without_home() {
        let result = expand_tilde_with(Path::new("~/x"), None);
        assert!(matches!(result, Err(PathError::Unsupported { .. })));
    }

    #[test]
    fn test_resolve_components_multiple_parent() {
        let resolved = resolve_components(Path::new("/a/b/../../c"));
        assert_eq!(resolved, PathBuf::from("/c"));
    }

    #[test]
    fn test_resolve_components_root_only() {
        assert_eq!(resolve_components(Path::new("/")), PathBuf::from("/"));
    }

    #[test]
    fn test_resolve_components_trailing_slash() {
        assert_eq!(
            resolve_components(Path::new("/a/b/")),
            resolve_components(Path::new("/a/b"))
        );
    }

    #[test]
    fn test_normalize_relative() {
        let cwd = env::current_dir().unwrap();
        let normalized = normalize(Path::new("relative/path")).unwrap();
        assert!(normalized.is_absolute());
        assert!(normalized.starts_with(&cwd));
        assert!(normalized.ends_with("relative/path"));
    }

    #[test]
    fn test_normalize_current_dir() {
        let cwd = env::current_dir().unwrap();
        assert_eq!(normalize(Path::new(".")).unwrap(), cwd);
    }

    #[cfg(unix)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn path_with_dots_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop_oneof![
                    Just(".".to_string()),
                    Just("..".to_string()),
                    "[a-zA-Z0-9_-]{1,10}".prop_map(|s| s),
                ],
                1..=8,
            )
            .prop_map(|parts| format!("/{}", parts.join("/")))
        }

        proptest! {
            /// Cleaning is idempotent.
            #[test]
            fn resolve_components_idempotent(s in path_with_dots_strategy()) {
                let once = resolve_components(Path::new(&s));
                let twice = resolve_components(&once);
                prop_assert_eq!(once, twice);
            }

            /// Cleaned paths are absolute and contain no `.` or `..` components.
            #[test]
            fn resolve_components_is_clean(s in path_with_dots_strategy()) {
                let resolved = resolve_components(Path::new(&s));
                prop_assert!(resolved.is_absolute());
                for component in resolved.components() {
                    prop_assert_ne!(component, Component::CurDir);
                    prop_assert_ne!(component, Component::ParentDir);
                }
            }
        }
    }
}
