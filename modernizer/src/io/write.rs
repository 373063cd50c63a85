//! In-place file replacement.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Atomically replace `path` with `contents` (temp file + rename).
///
/// The temp file lives in the same directory so the rename never crosses a
/// filesystem. Permissions of an existing file carry over, and a read-only
/// file is refused rather than replaced.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let permissions = fs::metadata(path).map(|meta| meta.permissions()).ok();
    if permissions.as_ref().is_some_and(|perm| perm.readonly()) {
        return Err(io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"))
            .with_context(|| format!("write {}", path.display()));
    }

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("write temp file for {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("sync temp file for {}", path.display()))?;
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("copy permissions to temp file for {}", path.display()))?;
    }
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
