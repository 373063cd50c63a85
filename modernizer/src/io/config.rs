//! Migration settings stored in `modernizer.toml` at the scan root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::exclusion::Containment;

pub const CONFIG_FILE_NAME: &str = "modernizer.toml";
pub const DEFAULT_EXTENSION: &str = "dart";
pub const DEFAULT_EXCLUDE: &str = "lib/merge_conflicts";

/// Migrator configuration (TOML).
///
/// Every field is optional in the file; missing fields take the defaults
/// below. Command-line flags override whatever is loaded here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MigratorConfig {
    /// Extension of files to migrate, without the leading dot.
    pub extension: String,

    /// Directory to skip, relative to the scan root unless absolute.
    pub exclude: Option<PathBuf>,

    pub containment: Containment,

    /// Skip matches inside string literals and comments.
    pub strict: bool,
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            exclude: Some(PathBuf::from(DEFAULT_EXCLUDE)),
            containment: Containment::default(),
            strict: false,
        }
    }
}

impl MigratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.extension.trim().is_empty() {
            return Err(anyhow!("extension must not be empty"));
        }
        if self.extension.starts_with('.') {
            return Err(anyhow!(
                "extension must not start with '.' (got '{}')",
                self.extension
            ));
        }
        if self.extension.contains(['/', '\\']) {
            return Err(anyhow!("extension must not contain path separators"));
        }
        if let Some(exclude) = &self.exclude
            && exclude.as_os_str().is_empty()
        {
            return Err(anyhow!("exclude must not be empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `MigratorConfig::default()`.
pub fn load_config(path: &Path) -> Result<MigratorConfig> {
    if !path.exists() {
        return Ok(MigratorConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MigratorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate().with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
