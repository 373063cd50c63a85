//! Exclusion-path containment checks.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How a candidate path is compared against the exclusion path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Containment {
    /// String-prefix comparison. `lib/merge_conflicts` also excludes
    /// `lib/merge_conflicts_old/`.
    #[default]
    Prefix,
    /// Component-wise containment; sibling directories sharing a name prefix
    /// are not excluded.
    Segment,
}

/// Whether `path` lies under `exclude`.
///
/// Both paths must be built from the same root so their representations are
/// comparable.
pub fn is_excluded(path: &Path, exclude: &Path, containment: Containment) -> bool {
    match containment {
        Containment::Prefix => path.to_string_lossy().starts_with(&*exclude.to_string_lossy()),
        Containment::Segment => path.starts_with(exclude),
    }
}

/// Lexically drop `.` components and fold `..` into its parent.
///
/// Symlinks are not resolved; callers canonicalize paths that exist.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
