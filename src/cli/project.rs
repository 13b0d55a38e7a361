//! Project CLI commands

use clap::Subcommand;

use crate::error::SpendbookResult;
use crate::storage::Store;

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Add a new project
    Add {
        /// Project name
        name: String,

        /// Emoji shown next to the project name
        #[arg(short, long, default_value = "📁")]
        emoji: String,
    },

    /// List all projects
    List,

    /// Delete a project and everything in it
    Delete {
        /// Project name
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a project command
pub fn handle_project_command(store: &Store, cmd: ProjectCommands) -> SpendbookResult<()> {
    match cmd {
        ProjectCommands::Add { name, emoji } => {
            let project = store.create_project(&name, &emoji)?;
            println!("Created project: {} {}", project.emoji, project.name);
        }

        ProjectCommands::List => {
            let projects = store.list_projects()?;

            if projects.is_empty() {
                println!("No projects found.");
                println!("Create one with: spendbook project add <name>");
                return Ok(());
            }

            println!("Projects");
            println!("========");
            for project in &projects {
                println!("  {} {}", project.emoji, project.name);
            }
            println!();
            println!("Total: {} project(s)", projects.len());
        }

        ProjectCommands::Delete { name, force } => {
            let project = store
                .find_project_by_name(&name)?
                .ok_or_else(|| crate::error::SpendbookError::project_not_found(&name))?;

            if !force {
                println!("WARNING: This deletes the project and all its expenses!");
                println!("To proceed, run again with --force flag:");
                println!("  spendbook project delete \"{}\" --force", name);
                return Ok(());
            }

            store.delete_project(project.id)?;
            println!("Deleted project: {} {}", project.emoji, project.name);
        }
    }

    Ok(())
}
