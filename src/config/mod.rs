//! Configuration management for `profilekit.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── avatar     # [avatar]
//! │   ├── ingest     # [ingest]
//! │   └── store      # [store]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # ProfileConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                              |
//! |------------|------------------------------------------------------|
//! | `[avatar]` | Avatar side lengths for single and bulk generation   |
//! | `[ingest]` | Upload limits, resize bounds, encoder quality        |
//! | `[store]`  | Location of the local store document                 |
//!
//! The file is optional. Without one, defaults apply and relative paths
//! resolve against the working directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{AvatarConfig, IngestConfig, StoreConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

use crate::{
    cli::{Cli, Commands, ImagesAction, IngestFlags},
    debug,
    ingest::IngestOptions,
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Config file looked up when `--config` is not given.
pub const CONFIG_FILE: &str = "profilekit.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing profilekit.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Avatar generation settings
    #[serde(default)]
    pub avatar: AvatarConfig,

    /// Photo ingest settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Local store settings
    #[serde(default)]
    pub store: StoreConfig,
}

impl ProfileConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. A missing default
    /// file means defaults; a missing `--config` file is an error.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let name = cli.config.as_deref().unwrap_or(Path::new(CONFIG_FILE));

        let mut config = match find_config_file(&cwd, name) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(path);
                config
            }
            None if cli.config.is_some() => {
                return Err(ConfigError::Io(
                    name.to_path_buf(),
                    io::Error::new(io::ErrorKind::NotFound, "config file not found"),
                )
                .into());
            }
            None => {
                debug!("config"; "no {} found, using defaults", CONFIG_FILE);
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli, &cwd);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolved location of the local store.
    pub fn store_path(&self) -> PathBuf {
        self.store.resolve(&self.root)
    }

    /// Ingest options from the `[ingest]` section.
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions::from(&self.ingest)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply CLI overrides on top of file values.
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        crate::logger::set_verbose(cli.verbose);

        if let Some(path) = &cli.store {
            self.store.path = cwd.join(path);
        }

        match &cli.command {
            Commands::Avatar { size, .. } => {
                Self::update_option(&mut self.avatar.size, size.as_ref());
            }
            Commands::Seed { size, .. } => {
                Self::update_option(&mut self.avatar.seed_size, size.as_ref());
            }
            Commands::Ingest { flags, .. }
            | Commands::Images {
                action: ImagesAction::AddProject { flags, .. },
            } => self.apply_ingest_flags(flags),
            Commands::Images { .. } | Commands::Profile { .. } => {}
        }
    }

    /// Apply ingest flags from CLI.
    fn apply_ingest_flags(&mut self, flags: &IngestFlags) {
        if flags.no_compress {
            self.ingest.compress = false;
        }
        Self::update_option(&mut self.ingest.max_width, flags.max_width.as_ref());
        Self::update_option(&mut self.ingest.max_height, flags.max_height.as_ref());
        Self::update_option(&mut self.ingest.quality, flags.quality.as_ref());
        Self::update_option(&mut self.ingest.max_size_mb, flags.max_size_mb.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate all sections, collecting every error before failing.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.avatar.validate(&mut diag);
        self.ingest.validate(&mut diag);
        self.store.validate(&mut diag);

        diag.into_result().map_err(ConfigError::Diagnostics)?;

        let store = self.store_path();
        if store.is_dir() {
            return Err(ConfigError::Validation(format!(
                "store path `{}` is a directory",
                store.display()
            ))
            .into());
        }
        Ok(())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ProfileConfig {
    let (parsed, ignored) = ProfileConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(ProfileConfig::from_str("[avatar\nsize = 10").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ProfileConfig::default();
        assert!(config.config_path.is_none());
        assert_eq!(config.avatar.size, 200);
        assert!(config.ingest.compress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[avatar]\nsize = 64\ncolour = \"red\"\n[unknown_section]\nfield = 1";
        let (config, ignored) = ProfileConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.avatar.size, 64);
        assert!(ignored.iter().any(|f| f.contains("colour")));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[avatar]\nsize = 64\n[ingest]\nquality = 0.9\n[store]\npath = \"s.json\"";
        let (_, ignored) = ProfileConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_validation_collects_every_section() {
        let config = test_parse_config("[avatar]\nsize = 0\n[ingest]\nquality = 2.0");
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err:?}");
        };
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "profilekit",
            "ingest",
            "photo.png",
            "--no-compress",
            "--max-width",
            "320",
            "--quality",
            "0.5",
        ]);
        let mut config = test_parse_config("[ingest]\nmax_width = 1024\nmax_height = 600");
        config.apply_cli(&cli, Path::new("/work"));

        let options = config.ingest_options();
        assert!(!options.compress);
        assert_eq!(options.max_width, 320);
        assert_eq!(options.max_height, 600);
        assert!((options.quality - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_store_override_is_relative_to_cwd() {
        let cli = Cli::parse_from(["profilekit", "--store", "db.json", "images", "list"]);
        let mut config = ProfileConfig {
            root: PathBuf::from("/project"),
            ..ProfileConfig::default()
        };
        config.apply_cli(&cli, Path::new("/work"));
        assert_eq!(config.store_path(), PathBuf::from("/work/db.json"));
    }

    #[test]
    fn test_seed_size_override() {
        let cli = Cli::parse_from(["profilekit", "seed", "users.json", "--size", "128"]);
        let mut config = ProfileConfig::default();
        config.apply_cli(&cli, Path::new("/work"));
        assert_eq!(config.avatar.seed_size, 128);
        assert_eq!(config.avatar.size, 200);
    }

    #[test]
    fn test_store_path_must_not_be_directory() {
        let dir = TempDir::new().unwrap();
        let mut config = ProfileConfig {
            root: dir.path().to_path_buf(),
            ..ProfileConfig::default()
        };
        config.store.path = PathBuf::from(".");

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[store]\npath = \"store.json\"").unwrap();

        let config = ProfileConfig::from_path(&path).unwrap();
        assert_eq!(config.store.path, PathBuf::from("store.json"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ProfileConfig::from_path(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(..))
        ));
    }
}
