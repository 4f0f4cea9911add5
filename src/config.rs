//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::constants::{APP_DIR_NAME, CONFIG_DIR_ENV};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory of the blob store holding modules and projects
    /// (defaults to `<config dir>/data`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Directory containing a seed `manifest.json` used on first run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_dir: Option<PathBuf>,
}

/// Export preferences for rendered projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Wrap each instance in a preview frame when exporting
    #[serde(default)]
    pub wrap_frames: bool,
    /// Copy to the clipboard when no explicit output is given
    #[serde(default)]
    pub clipboard: bool,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/mailforge/config.toml`
/// - macOS: `~/Library/Application Support/mailforge/config.toml`
/// - Windows: `%APPDATA%\mailforge\config.toml`
///
/// The directory can be overridden with `MAILFORGE_CONFIG_DIR`.
///
/// # Validation
///
/// - `data_dir`, if set, must not point at a regular file
/// - a missing `seed_dir` loads with a warning; `config set --seed-dir`
///   rejects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Export preferences
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// Honors `MAILFORGE_CONFIG_DIR`, otherwise the platform config dir:
    /// - Linux: `~/.config/mailforge/`
    /// - macOS: `~/Library/Application Support/mailforge/`
    /// - Windows: `%APPDATA%\mailforge\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolves the blob store directory, falling back to `<config dir>/data`.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("data")),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        if let Err(e) = config.validate_seed_dir() {
            warn!("{:#}; built-in starter modules will be used", e);
        }
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path (temp file + rename).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp config file: {}", temp_path.display()))?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp config file to: {}", path.display()))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(data_dir) = &self.paths.data_dir {
            if data_dir.is_file() {
                anyhow::bail!(
                    "Data directory path points to a file: {}",
                    data_dir.display()
                );
            }
        }

        Ok(())
    }

    /// Checks that the configured seed directory, if any, exists.
    pub fn validate_seed_dir(&self) -> Result<()> {
        if let Some(seed_dir) = &self.paths.seed_dir {
            if !seed_dir.is_dir() {
                anyhow::bail!("Seed directory does not exist: {}", seed_dir.display());
            }
        }
        Ok(())
    }
}
