//! Property-based tests for canonicalization.
//!
//! These build real directory trees under a tempdir, so they are gated
//! behind the `property-tests` feature.

use super::canonicalize::canonicalize;
use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}"
}

fn relative_dir_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(component_strategy(), 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // canonicalize(canonicalize(p)) == canonicalize(p)
    #[test]
    fn canonicalize_idempotent(parts in relative_dir_strategy()) {
        let root = tempdir().unwrap();
        let dir: PathBuf = parts.iter().fold(root.path().to_path_buf(), |p, c| p.join(c));
        fs::create_dir_all(&dir).unwrap();

        let once = canonicalize(&dir).unwrap();
        let twice = canonicalize(once.as_path()).unwrap();
        prop_assert_eq!(once, twice);
    }

    // A file and its directory canonicalize identically
    #[test]
    fn file_maps_to_parent(parts in relative_dir_strategy(), file in component_strategy()) {
        let root = tempdir().unwrap();
        let dir: PathBuf = parts.iter().fold(root.path().to_path_buf(), |p, c| p.join(c));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join(format!("{file}.txt"));
        fs::write(&file, "").unwrap();

        prop_assert_eq!(canonicalize(&file).unwrap(), canonicalize(&dir).unwrap());
    }

    // Inserting "x/.." detours anywhere in the path changes nothing
    #[test]
    fn dot_dot_detours_are_cleaned(parts in relative_dir_strategy(), at in 0usize..6) {
        let root = tempdir().unwrap();
        let dir: PathBuf = parts.iter().fold(root.path().to_path_buf(), |p, c| p.join(c));
        fs::create_dir_all(&dir).unwrap();

        let split = at.min(parts.len());
        let mut messy = root.path().to_path_buf();
        for (i, part) in parts.iter().enumerate() {
            if i == split {
                messy.push("detour");
                messy.push("..");
                messy.push(".");
            }
            messy.push(part);
        }
        // "detour" must exist for the kernel to resolve "detour/.."
        let parent = messy
            .ancestors()
            .find(|p| p.ends_with("detour"))
            .map(PathBuf::from);
        if let Some(parent) = parent {
            fs::create_dir_all(parent).unwrap();
        }

        prop_assert_eq!(canonicalize(&messy).unwrap(), canonicalize(&dir).unwrap());
    }
}
