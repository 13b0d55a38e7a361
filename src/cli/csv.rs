//! CSV interchange CLI commands

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{SpendbookError, SpendbookResult};
use crate::interchange::{export_expenses_csv, ImportService};
use crate::models::Project;
use crate::storage::Store;

/// CSV subcommands
#[derive(Subcommand)]
pub enum CsvCommands {
    /// Export expenses to CSV
    Export {
        /// Limit the export to one project
        #[arg(short, long)]
        project: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import expenses from a CSV file into a project
    Import {
        /// Target project name
        project: String,

        /// Path to the CSV file
        file: PathBuf,

        /// Create the project if it does not exist
        #[arg(short, long)]
        create: bool,
    },
}

/// Handle a CSV command
pub fn handle_csv_command(store: &Store, cmd: CsvCommands) -> SpendbookResult<()> {
    match cmd {
        CsvCommands::Export { project, output } => {
            let project_id = match project {
                Some(name) => Some(resolve_project(store, &name)?.id),
                None => None,
            };

            match output {
                Some(path) => {
                    let mut file = File::create(&path)?;
                    export_expenses_csv(store, project_id, &mut file)?;
                    file.flush()?;
                    println!("Exported to {}", path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    export_expenses_csv(store, project_id, &mut handle)?;
                }
            }
        }

        CsvCommands::Import {
            project,
            file,
            create,
        } => {
            let target = match store.find_project_by_name(&project)? {
                Some(existing) => existing,
                None if create => store.create_project(&project, "📁")?,
                None => return Err(SpendbookError::project_not_found(&project)),
            };

            let reader = File::open(&file)?;
            let summary = ImportService::new(store).import(reader, target.id)?;

            println!(
                "Imported {} expense(s) into {} {}",
                summary.imported, target.emoji, target.name
            );
            if summary.skipped > 0 {
                println!("Skipped {} unusable row(s).", summary.skipped);
            }
            if summary.categories_created > 0 {
                println!("Created {} new categorie(s).", summary.categories_created);
            }
        }
    }

    Ok(())
}

fn resolve_project(store: &Store, name: &str) -> SpendbookResult<Project> {
    store
        .find_project_by_name(name)?
        .ok_or_else(|| SpendbookError::project_not_found(name))
}
