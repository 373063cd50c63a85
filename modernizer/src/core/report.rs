//! The changed-file report printed at the end of a run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::rules::RuleHit;

/// One file whose content differed after all rules ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Path relative to the scan root.
    pub path: PathBuf,
    pub rule_hits: Vec<RuleHit>,
}

/// Outcome of one run, in file visit order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// No file was written; `modified` lists what would have changed.
    pub dry_run: bool,
    /// Number of candidate files read.
    pub scanned: usize,
    pub modified: Vec<FileChange>,
}

impl MigrationReport {
    pub fn paths(&self) -> Vec<PathBuf> {
        self.modified
            .iter()
            .map(|change| change.path.clone())
            .collect()
    }

    /// Human-readable summary: a count line followed by one path per line.
    pub fn render_text(&self) -> String {
        let verb = if self.dry_run {
            "Would modify"
        } else {
            "Modified"
        };
        let mut buf = format!("{verb} {} files:\n", self.modified.len());
        for change in &self.modified {
            buf.push_str(&change.path.display().to_string());
            buf.push('\n');
        }
        buf
    }

    /// Single-line JSON with trailing newline.
    pub fn render_json(&self) -> Result<String> {
        let mut payload = serde_json::to_string(self).context("serialize report json")?;
        payload.push('\n');
        Ok(payload)
    }
}
