//! CLI command handlers for Mailforge.
//!
//! This module provides headless, scriptable access to the module repository
//! and project composition engine.

pub mod common;
pub mod config;
pub mod module;
pub mod project;

use clap::{Parser, Subcommand};

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode, GlobalArgs};
pub use config::ConfigArgs;
pub use module::ModuleArgs;
pub use project::ProjectArgs;

/// Mailforge - compose HTML emails from reusable placeholder modules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Options shared by every command
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the module repository
    Module(ModuleArgs),
    /// Compose and render projects
    Project(ProjectArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

impl Cli {
    /// Dispatch to the selected command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            Command::Module(args) => args.execute(&self.global),
            Command::Project(args) => args.execute(&self.global),
            Command::Config(args) => args.execute(&self.global),
        }
    }
}
