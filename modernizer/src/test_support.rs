//! Test-only helpers for building source trees on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A throwaway directory tree, removed on drop.
pub struct FixtureTree {
    dir: TempDir,
}

impl FixtureTree {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create fixture tempdir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create fixture dir {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.dir.path().join(relative);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}
