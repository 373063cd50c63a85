//! Deprecated Flutter API migrator.
//!
//! Rewrites `.withOpacity(..)`, `background` color-scheme members and named
//! arguments, and bare `print(` calls across a Dart source tree, then prints
//! the files it modified.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use modernizer::core::exclusion::Containment;
use modernizer::exit_codes;
use modernizer::io::config::{CONFIG_FILE_NAME, load_config};
use modernizer::logging;
use modernizer::migrate::{MigrateOptions, run_with};

#[derive(Parser)]
#[command(
    name = "modernizer",
    version,
    about = "Rewrite deprecated Flutter API usage in Dart sources"
)]
struct Cli {
    /// Directory to scan recursively.
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Directory to skip, relative to ROOT unless absolute [default: lib/merge_conflicts].
    #[arg(long, conflicts_with = "no_exclude")]
    exclude: Option<PathBuf>,

    /// Scan every directory, including the default exclusion.
    #[arg(long)]
    no_exclude: bool,

    /// Extension of files to migrate, without the dot [default: dart].
    #[arg(long)]
    extension: Option<String>,

    /// How the exclusion path is matched [default: prefix].
    #[arg(long, value_enum)]
    containment: Option<Containment>,

    /// Skip matches inside string literals and comments.
    #[arg(long)]
    strict: bool,

    /// Report what would change without writing any file.
    #[arg(long)]
    dry_run: bool,

    /// Report format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file [default: ROOT/modernizer.toml].
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILED);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = resolve_options(&cli)?;
    let report = run_with(&options)?;
    match cli.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => print!("{}", report.render_json()?),
    }
    Ok(())
}

/// Merge built-in defaults, the config file, and CLI flags (in that order).
fn resolve_options(cli: &Cli) -> Result<MigrateOptions> {
    let config_path = match &cli.config {
        Some(path) if !path.exists() => bail!("config {} not found", path.display()),
        Some(path) => path.clone(),
        None => cli.root.join(CONFIG_FILE_NAME),
    };
    let mut cfg = load_config(&config_path)?;
    if let Some(extension) = &cli.extension {
        cfg.extension = extension.clone();
    }
    if cli.no_exclude {
        cfg.exclude = None;
    } else if let Some(exclude) = &cli.exclude {
        cfg.exclude = Some(exclude.clone());
    }
    if let Some(containment) = cli.containment {
        cfg.containment = containment;
    }
    cfg.strict |= cli.strict;
    cfg.validate()?;

    let mut options = MigrateOptions::from_config(&cli.root, &cfg);
    options.dry_run = cli.dry_run;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modernizer::core::rules::MatchMode;
    use std::fs;

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["modernizer"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.exclude.is_none());
        assert!(!cli.dry_run);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn parse_all_flags() {
        let cli = Cli::parse_from([
            "modernizer",
            "app",
            "--exclude",
            "lib/gen",
            "--extension",
            "ext",
            "--containment",
            "segment",
            "--strict",
            "--dry-run",
            "--format",
            "json",
        ]);
        assert_eq!(cli.root, PathBuf::from("app"));
        assert_eq!(cli.exclude, Some(PathBuf::from("lib/gen")));
        assert_eq!(cli.extension.as_deref(), Some("ext"));
        assert_eq!(cli.containment, Some(Containment::Segment));
        assert!(cli.strict);
        assert!(cli.dry_run);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn exclude_conflicts_with_no_exclude() {
        let result = Cli::try_parse_from(["modernizer", "--exclude", "x", "--no-exclude"]);
        assert!(result.is_err());
    }

    #[test]
    fn defaults_apply_without_config_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["modernizer", root.as_str()]);
        let options = resolve_options(&cli).expect("options");
        assert_eq!(options, MigrateOptions::new(temp.path()));
    }

    #[test]
    fn flags_override_config_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "extension = \"ext\"\nexclude = \"gen\"\ncontainment = \"segment\"\n",
        )
        .expect("write config");
        let root = temp.path().to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "modernizer",
            root.as_str(),
            "--exclude",
            "build",
            "--strict",
        ]);

        let options = resolve_options(&cli).expect("options");
        assert_eq!(options.extension, "ext");
        assert_eq!(options.exclude, Some(PathBuf::from("build")));
        assert_eq!(options.containment, Containment::Segment);
        assert_eq!(options.mode, MatchMode::CodeOnly);
    }

    #[test]
    fn no_exclude_clears_configured_exclusion() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["modernizer", root.as_str(), "--no-exclude"]);
        let options = resolve_options(&cli).expect("options");
        assert_eq!(options.exclude, None);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let cli = Cli::parse_from(["modernizer", "--config", "/definitely/missing.toml"]);
        let err = resolve_options(&cli).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn invalid_extension_flag_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["modernizer", root.as_str(), "--extension", ".dart"]);
        assert!(resolve_options(&cli).is_err());
    }
}
