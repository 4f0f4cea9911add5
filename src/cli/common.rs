//! Shared CLI plumbing: error type, exit codes and workspace opening.

use clap::Args;
use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::ComposerError;
use crate::services::{seed, FileBlobStore, Workspace};

/// Process exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input or configuration
    Validation = 1,
    /// A module, project or instance id did not resolve
    NotFound = 2,
    /// File system, storage or clipboard failure
    Io = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error reported by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Human-readable message
    pub message: String,
    /// Exit code to terminate with
    pub exit_code: ExitCode,
}

impl CliError {
    /// Invalid input or configuration.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Validation,
        }
    }

    /// Unresolved id.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::NotFound,
        }
    }

    /// I/O or storage failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Io,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<ComposerError>() {
            Some(ComposerError::NotFound { .. }) => Self::not_found(format!("{err:#}")),
            Some(ComposerError::EmptyField { .. }) => Self::validation(format!("{err:#}")),
            None => Self::io(format!("{err:#}")),
        }
    }
}

/// Result type for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Options shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Override the data directory holding modules and projects
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Loads configuration, applying the `--data-dir` override.
    pub fn config(&self) -> CliResult<Config> {
        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        if let Some(dir) = &self.data_dir {
            config.paths.data_dir = Some(dir.clone());
        }
        Ok(config)
    }

    /// Opens the file-backed workspace, seeding it on first run.
    pub fn open_workspace(&self) -> CliResult<Workspace<FileBlobStore>> {
        let config = self.config()?;
        let data_dir = config
            .data_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?;

        let seed_dir = config.paths.seed_dir.clone();
        let (workspace, _report) = Workspace::open(FileBlobStore::new(data_dir), || {
            seed::resolve(seed_dir.as_deref())
        })?;
        Ok(workspace)
    }
}

/// Prints a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityKind;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Validation.code(), 1);
        assert_eq!(ExitCode::NotFound.code(), 2);
        assert_eq!(ExitCode::Io.code(), 3);
    }

    #[test]
    fn test_from_anyhow_maps_core_errors() {
        let err: CliError =
            anyhow::Error::from(ComposerError::not_found(EntityKind::Module, "mod_x")).into();
        assert_eq!(err.exit_code, ExitCode::NotFound);
        assert!(err.message.contains("mod_x"));

        let err: CliError = anyhow::Error::from(ComposerError::EmptyField { field: "name" }).into();
        assert_eq!(err.exit_code, ExitCode::Validation);

        let err: CliError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.exit_code, ExitCode::Io);
    }
}
