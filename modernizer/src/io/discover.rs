//! Recursive discovery of candidate files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// Collect files under `root` whose name ends with `.{extension}`.
///
/// Entries are visited in file-name order at every level, so the result is
/// stable across runs. Any entry for which `keep` returns false is skipped
/// and, if it is a directory, not descended into. Matching files are never
/// opened here.
pub fn discover_files<F>(root: &Path, extension: &str, mut keep: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path) -> bool,
{
    let suffix = format!(".{extension}");
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let kept = keep(entry.path());
            if !kept {
                debug!(path = %entry.path().display(), "excluded");
            }
            kept
        });
    for entry in walker {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixtureTree;

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|path| {
                path.strip_prefix(root)
                    .expect("under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn finds_matching_files_in_sorted_order() {
        let tree = FixtureTree::new().expect("tree");
        tree.write("lib/b.dart", "").expect("write");
        tree.write("lib/a.dart", "").expect("write");
        tree.write("main.dart", "").expect("write");
        tree.write("README.md", "").expect("write");
        tree.write("lib/notes.dart.bak", "").expect("write");

        let files = discover_files(tree.path(), "dart", |_| true).expect("discover");
        assert_eq!(
            relative(tree.path(), &files),
            vec!["lib/a.dart", "lib/b.dart", "main.dart"]
        );
    }

    #[test]
    fn rejected_directories_are_pruned() {
        let tree = FixtureTree::new().expect("tree");
        tree.write("keep/a.dart", "").expect("write");
        tree.write("skip/b.dart", "").expect("write");
        tree.write("skip/deep/c.dart", "").expect("write");

        let skip = tree.path().join("skip");
        let files =
            discover_files(tree.path(), "dart", |path| !path.starts_with(&skip)).expect("walk");
        assert_eq!(relative(tree.path(), &files), vec!["keep/a.dart"]);
    }

    #[test]
    fn directories_named_like_files_are_not_returned() {
        let tree = FixtureTree::new().expect("tree");
        tree.write("odd.dart/inner.dart", "").expect("write");

        let files = discover_files(tree.path(), "dart", |_| true).expect("discover");
        assert_eq!(relative(tree.path(), &files), vec!["odd.dart/inner.dart"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_skipped() {
        let tree = FixtureTree::new().expect("tree");
        let target = tree.write("real.dart", "").expect("write");
        std::os::unix::fs::symlink(&target, tree.path().join("alias.dart")).expect("symlink");

        let files = discover_files(tree.path(), "dart", |_| true).expect("discover");
        assert_eq!(relative(tree.path(), &files), vec!["real.dart"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = discover_files(&temp.path().join("nope"), "dart", |_| true).unwrap_err();
        assert!(err.to_string().contains("walk"));
    }
}
