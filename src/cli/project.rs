//! Project composition commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{print_json, CliError, CliResult, GlobalArgs};
use crate::export::{export_html, ExportTarget};

/// Compose projects from modules
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Project subcommand
    #[command(subcommand)]
    pub command: ProjectCommand,
}

/// Project subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ProjectCommand {
    /// List projects, most recently updated first
    List(ListArgs),
    /// Create an empty project
    New(NewArgs),
    /// Append a module instance to a project
    Add(AddArgs),
    /// Remove a module instance from a project
    Remove(RemoveArgs),
    /// Move a module instance to a new position
    Move(MoveArgs),
    /// Set a placeholder value on a module instance
    Set(SetArgs),
    /// Show the editable fields of every instance
    Fields(FieldsArgs),
    /// Render a project's HTML
    Render(RenderArgs),
}

/// List projects
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Create a project
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Project name
    pub name: String,
}

/// Append an instance
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Project id
    pub project: String,
    /// Module id
    pub module: String,
}

/// Remove an instance
#[derive(Debug, Clone, Args)]
pub struct RemoveArgs {
    /// Project id
    pub project: String,
    /// Instance id
    pub instance: String,
}

/// Move an instance
#[derive(Debug, Clone, Args)]
pub struct MoveArgs {
    /// Project id
    pub project: String,
    /// Instance id
    pub instance: String,
    /// Target position (0-based, clamped to the last position)
    pub index: usize,
}

/// Set a placeholder value
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    /// Project id
    pub project: String,
    /// Instance id
    pub instance: String,
    /// Placeholder name
    pub key: String,
    /// Value (hex colors are normalized for color-like keys)
    pub value: String,
}

/// Show editable fields
#[derive(Debug, Clone, Args)]
pub struct FieldsArgs {
    /// Project id
    pub project: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Render a project
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Project id
    pub project: String,

    /// Write the HTML to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Copy the HTML to the clipboard
    #[arg(long)]
    pub clipboard: bool,

    /// Wrap each instance in a preview frame
    #[arg(long)]
    pub frames: bool,
}

/// Project summary for JSON output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    /// Project id
    pub id: String,
    /// Project name
    pub name: String,
    /// Number of instances
    pub instance_count: usize,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

impl ProjectArgs {
    /// Execute the project command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        match &self.command {
            ProjectCommand::List(args) => args.execute(global),
            ProjectCommand::New(args) => args.execute(global),
            ProjectCommand::Add(args) => args.execute(global),
            ProjectCommand::Remove(args) => args.execute(global),
            ProjectCommand::Move(args) => args.execute(global),
            ProjectCommand::Set(args) => args.execute(global),
            ProjectCommand::Fields(args) => args.execute(global),
            ProjectCommand::Render(args) => args.execute(global),
        }
    }
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let workspace = global.open_workspace()?;
        let projects: Vec<ProjectInfo> = workspace
            .projects_by_recency()
            .into_iter()
            .map(|p| ProjectInfo {
                id: p.id.clone(),
                name: p.name.clone(),
                instance_count: p.instances.len(),
                created_at: p.created_at.to_rfc3339(),
                updated_at: p.updated_at.to_rfc3339(),
            })
            .collect();

        if self.json {
            return print_json(&projects);
        }

        if projects.is_empty() {
            println!("No projects yet. Create one with `project new <name>`.");
            return Ok(());
        }

        for project in &projects {
            println!(
                "  {}  {}  ({} module(s), updated {})",
                project.id, project.name, project.instance_count, project.updated_at
            );
        }
        Ok(())
    }
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut workspace = global.open_workspace()?;
        let project = workspace.create_project(&self.name)?;
        println!("{}", project.id);
        Ok(())
    }
}

impl AddArgs {
    /// Execute the add command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut workspace = global.open_workspace()?;
        let instance = workspace.add_instance(&self.project, &self.module)?;
        println!("{}", instance.instance_id);
        Ok(())
    }
}

impl RemoveArgs {
    /// Execute the remove command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut workspace = global.open_workspace()?;
        if workspace.remove_instance(&self.project, &self.instance)? {
            println!("Removed instance {}", self.instance);
        } else {
            println!("No instance {} in project; nothing removed.", self.instance);
        }
        Ok(())
    }
}

impl MoveArgs {
    /// Execute the move command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut workspace = global.open_workspace()?;
        let index = workspace.reorder_instance(&self.project, &self.instance, self.index)?;
        println!("Instance {} is now at position {}", self.instance, index);
        Ok(())
    }
}

impl SetArgs {
    /// Execute the set command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let mut workspace = global.open_workspace()?;
        let stored = workspace.set_value(&self.project, &self.instance, &self.key, &self.value)?;
        println!("{} = {}", self.key, stored);
        Ok(())
    }
}

impl FieldsArgs {
    /// Execute the fields command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let workspace = global.open_workspace()?;
        let listing = workspace.instance_fields(&self.project)?;

        if self.json {
            return print_json(&listing);
        }

        if listing.is_empty() {
            println!("No modules yet. Add one with `project add <project> <module>`.");
            return Ok(());
        }

        for (position, instance) in listing.iter().enumerate() {
            println!(
                "[{}] {} ({})",
                position, instance.module_name, instance.instance_id
            );
            for (key, value) in &instance.fields {
                println!("    {key} = {value}");
            }
        }
        Ok(())
    }
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.config()?;
        let workspace = global.open_workspace()?;

        let html = if self.frames || config.export.wrap_frames {
            workspace.render_preview(&self.project)?
        } else {
            workspace.render(&self.project)?
        };

        let target = ExportTarget::choose(self.out.clone(), self.clipboard || config.export.clipboard);
        export_html(&html, &target).map_err(|e| CliError::io(format!("{e:#}")))?;

        match target {
            ExportTarget::File(path) => eprintln!("Wrote {}", path.display()),
            ExportTarget::Clipboard => eprintln!("Copied HTML to clipboard"),
            ExportTarget::Stdout => {}
        }
        Ok(())
    }
}
