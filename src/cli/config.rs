//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{print_json, CliError, CliResult, GlobalArgs};
use crate::config::Config;
use crate::constants::APP_NAME;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Data directory for modules and projects
    #[arg(long = "data", value_name = "DIR")]
    data: Option<PathBuf>,

    /// Directory containing a seed manifest.json
    #[arg(long, value_name = "DIR")]
    seed_dir: Option<PathBuf>,

    /// Wrap exported instances in preview frames
    #[arg(long, value_name = "BOOL")]
    wrap_frames: Option<bool>,

    /// Copy rendered HTML to the clipboard by default
    #[arg(long, value_name = "BOOL")]
    clipboard: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    data_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed_dir: Option<String>,
    wrap_frames: bool,
    clipboard: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(global),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.config()?;
        let data_dir = config
            .data_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?;

        let output = ConfigOutput {
            data_dir: data_dir.to_string_lossy().to_string(),
            seed_dir: config
                .paths
                .seed_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            wrap_frames: config.export.wrap_frames,
            clipboard: config.export.clipboard,
        };

        if self.json {
            return print_json(&output);
        }

        println!("{APP_NAME} Configuration");
        println!("=======================");
        println!();
        println!("Paths:");
        println!("  Data Directory: {}", output.data_dir);
        match &output.seed_dir {
            Some(dir) => println!("  Seed Directory: {dir}"),
            None => println!("  Seed Directory: (built-in starter modules)"),
        }
        println!();
        println!("Export:");
        println!("  Wrap Frames: {}", output.wrap_frames);
        println!("  Clipboard:   {}", output.clipboard);
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.data.is_none()
            && self.seed_dir.is_none()
            && self.wrap_frames.is_none()
            && self.clipboard.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --data, --seed-dir, --wrap-frames, or --clipboard",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(dir) = &self.data {
            config.paths.data_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.seed_dir {
            config.paths.seed_dir = Some(dir.clone());
            config
                .validate_seed_dir()
                .map_err(|e| CliError::validation(format!("{e:#}")))?;
        }
        if let Some(wrap) = self.wrap_frames {
            config.export.wrap_frames = wrap;
        }
        if let Some(clipboard) = self.clipboard {
            config.export.clipboard = clipboard;
        }

        config
            .save()
            .map_err(|e| CliError::validation(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}
