//! Module repository commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::cli::common::{print_json, CliError, CliResult, GlobalArgs};
use crate::models::Module;

/// Manage the module repository
#[derive(Debug, Clone, Args)]
pub struct ModuleArgs {
    /// Module subcommand
    #[command(subcommand)]
    pub command: ModuleCommand,
}

/// Module subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ModuleCommand {
    /// List modules
    List(ListArgs),
    /// Show a module's code and placeholders
    Show(ShowArgs),
    /// Create a module
    Add(AddArgs),
    /// Update a module's name and/or code
    Update(UpdateArgs),
    /// Delete a module and its instances in every project
    Delete(DeleteArgs),
}

/// List modules
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show a module
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Module id
    pub id: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Markup source: inline or from a file
#[derive(Debug, Clone, Args)]
#[group(multiple = false)]
pub struct CodeSource {
    /// Module markup
    #[arg(long, value_name = "HTML")]
    pub code: Option<String>,

    /// Read module markup from a file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl CodeSource {
    fn read(&self) -> CliResult<Option<String>> {
        if let Some(code) = &self.code {
            return Ok(Some(code.clone()));
        }
        match &self.file {
            Some(path) => fs::read_to_string(path).map(Some).map_err(|e| {
                CliError::io(format!("Failed to read {}: {e}", path.display()))
            }),
            None => Ok(None),
        }
    }
}

/// Create a module
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Module name
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Markup source
    #[command(flatten)]
    pub source: CodeSource,
}

/// Update a module
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Module id
    pub id: String,

    /// New module name
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Markup source
    #[command(flatten)]
    pub source: CodeSource,
}

/// Delete a module
#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Module id
    pub id: String,
}

/// Module summary for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    /// Module id
    pub id: String,
    /// Module name
    pub name: String,
    /// Placeholders in first-occurrence order
    pub placeholders: Vec<String>,
}

impl From<&Module> for ModuleInfo {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id.clone(),
            name: module.name.clone(),
            placeholders: module.placeholders(),
        }
    }
}

impl ModuleArgs {
    /// Execute the module command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        match &self.command {
            ModuleCommand::List(args) => args.execute(global),
            ModuleCommand::Show(args) => args.execute(global),
            ModuleCommand::Add(args) => args.execute(global),
            ModuleCommand::Update(args) => args.execute(global),
            ModuleCommand::Delete(args) => args.execute(global),
        }
    }
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let workspace = global.open_workspace()?;
        let modules: Vec<ModuleInfo> = workspace.modules().iter().map(ModuleInfo::from).collect();

        if self.json {
            return print_json(&modules);
        }

        if modules.is_empty() {
            println!("No modules found.");
            return Ok(());
        }

        println!("Modules ({}):\n", modules.len());
        for module in &modules {
            println!("  {}  {}", module.id, module.name);
            if !module.placeholders.is_empty() {
                println!("    Placeholders: {}", module.placeholders.join(", "));
            }
        }
        Ok(())
    }
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let workspace = global.open_workspace()?;
        let module = workspace
            .module(&self.id)
            .ok_or_else(|| CliError::not_found(format!("module not found: {}", self.id)))?;

        if self.json {
            #[derive(Serialize)]
            struct ModuleDetail<'a> {
                #[serde(flatten)]
                info: ModuleInfo,
                code: &'a str,
            }
            return print_json(&ModuleDetail {
                info: ModuleInfo::from(module),
                code: &module.code,
            });
        }

        println!("{} ({})", module.name, module.id);
        let placeholders = module.placeholders();
        if !placeholders.is_empty() {
            println!("Placeholders: {}", placeholders.join(", "));
        }
        println!();
        println!("{}", module.code);
        Ok(())
    }
}

impl AddArgs {
    /// Execute the add command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let code = self
            .source
            .read()?
            .ok_or_else(|| CliError::validation("Module markup is required: --code or --file"))?;

        let mut workspace = global.open_workspace()?;
        let module = workspace.create_module(&self.name, &code)?;
        println!("{}", module.id);
        Ok(())
    }
}

impl UpdateArgs {
    /// Execute the update command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let code = self.source.read()?;
        if self.name.is_none() && code.is_none() {
            return Err(CliError::validation(
                "At least one of --name, --code or --file must be specified",
            ));
        }

        let mut workspace = global.open_workspace()?;
        let current = workspace
            .module(&self.id)
            .ok_or_else(|| CliError::not_found(format!("module not found: {}", self.id)))?;
        let name = self.name.clone().unwrap_or_else(|| current.name.clone());
        let code = code.unwrap_or_else(|| current.code.clone());

        let module = workspace.update_module(&self.id, &name, &code)?;
        println!("Updated module {} ({})", module.id, module.name);
        Ok(())
    }
}

impl DeleteArgs {
    /// Execute the delete command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut workspace = global.open_workspace()?;
        if workspace.module(&self.id).is_none() {
            println!("No module with id {}; nothing deleted.", self.id);
            return Ok(());
        }

        let affected = workspace.delete_module(&self.id)?;
        println!(
            "Deleted module {} (instances removed from {} project(s))",
            self.id,
            affected.len()
        );
        Ok(())
    }
}
