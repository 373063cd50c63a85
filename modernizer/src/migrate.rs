//! Scan-transform-write pipeline.
//!
//! Files are processed one at a time in discovery order. The first read,
//! decode, or write failure aborts the run; files already rewritten stay
//! rewritten, and re-running is safe because every rule is idempotent.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::core::exclusion::{Containment, is_excluded, normalize};
use crate::core::report::{FileChange, MigrationReport};
use crate::core::rules::{MatchMode, Rule, apply_rules, default_rules};
use crate::io::config::MigratorConfig;
use crate::io::discover::discover_files;
use crate::io::write::write_atomic;

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateOptions {
    pub root: PathBuf,
    /// Resolved against `root` when relative.
    pub exclude: Option<PathBuf>,
    pub extension: String,
    pub containment: Containment,
    pub mode: MatchMode,
    pub dry_run: bool,
}

impl MigrateOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(root, &MigratorConfig::default())
    }

    pub fn from_config(root: impl Into<PathBuf>, cfg: &MigratorConfig) -> Self {
        Self {
            root: root.into(),
            exclude: cfg.exclude.clone(),
            extension: cfg.extension.clone(),
            containment: cfg.containment,
            mode: if cfg.strict {
                MatchMode::CodeOnly
            } else {
                MatchMode::Anywhere
            },
            dry_run: false,
        }
    }
}

/// Migrate every candidate file under `root`, skipping anything under
/// `exclude`, and return the modified paths relative to `root`.
pub fn run(root: &Path, exclude: &Path) -> Result<Vec<PathBuf>> {
    let options = MigrateOptions {
        exclude: Some(exclude.to_path_buf()),
        ..MigrateOptions::new(root)
    };
    Ok(run_with(&options)?.paths())
}

pub fn run_with(options: &MigrateOptions) -> Result<MigrationReport> {
    let root = fs::canonicalize(&options.root)
        .with_context(|| format!("resolve root {}", options.root.display()))?;
    if !root.is_dir() {
        bail!("root {} is not a directory", root.display());
    }
    let exclude = options.exclude.as_ref().map(|path| resolve_exclude(&root, path));
    debug!(
        root = %root.display(),
        exclude = ?exclude,
        extension = %options.extension,
        containment = ?options.containment,
        mode = ?options.mode,
        "starting migration"
    );

    let files = discover_files(&root, &options.extension, |path| {
        exclude
            .as_deref()
            .is_none_or(|exclude| !is_excluded(path, exclude, options.containment))
    })?;
    info!(candidates = files.len(), "discovered files");

    let rules = default_rules();
    let mut report = MigrationReport {
        dry_run: options.dry_run,
        scanned: files.len(),
        modified: Vec::new(),
    };
    for path in &files {
        if let Some(change) = migrate_file(&root, path, rules, options)? {
            report.modified.push(change);
        }
    }
    info!(
        scanned = report.scanned,
        modified = report.modified.len(),
        dry_run = options.dry_run,
        "migration finished"
    );
    Ok(report)
}

/// Resolve `exclude` against the canonical `root` so it is comparable with
/// walked paths. Existing paths are canonicalized (following symlinks);
/// missing ones are normalized lexically.
fn resolve_exclude(root: &Path, exclude: &Path) -> PathBuf {
    let joined = root.join(exclude);
    fs::canonicalize(&joined).unwrap_or_else(|_| normalize(&joined))
}

fn migrate_file(
    root: &Path,
    path: &Path,
    rules: &[Rule],
    options: &MigrateOptions,
) -> Result<Option<FileChange>> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let text =
        String::from_utf8(bytes).with_context(|| format!("decode {} as utf-8", path.display()))?;

    let rewrite = apply_rules(&text, rules, options.mode);
    if rewrite.text == text {
        debug!(path = %path.display(), "unchanged");
        return Ok(None);
    }
    if !options.dry_run {
        write_atomic(path, &rewrite.text)?;
    }

    let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    info!(path = %relative.display(), hits = ?rewrite.hits, "migrated");
    Ok(Some(FileChange {
        path: relative,
        rule_hits: rewrite.hits,
    }))
}
