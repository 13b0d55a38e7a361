use anyhow::Result;
use clap::{Parser, Subcommand};

use spendbook::cli::{handle_backup_command, handle_csv_command, handle_project_command};
use spendbook::config::StorePaths;
use spendbook::storage::Store;

#[derive(Parser)]
#[command(
    name = "spendbook",
    version,
    about = "Personal expense tracker with snapshot backups and CSV interchange",
    long_about = "Spendbook tracks expenses per project and keeps the data portable: \
                  full-state zip snapshots of the store and its attachments, plus \
                  per-project CSV export and import that tolerates hand-edited files."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project management commands
    #[command(subcommand)]
    Project(spendbook::cli::ProjectCommands),

    /// Snapshot backup commands
    #[command(subcommand)]
    Backup(spendbook::cli::BackupCommands),

    /// CSV export and import commands
    #[command(subcommand)]
    Csv(spendbook::cli::CsvCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let paths = StorePaths::new()?;
    let mut store = Store::open(paths.clone())?;

    match cli.command {
        Some(Commands::Project(cmd)) => {
            handle_project_command(&store, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&mut store, cmd)?;
        }
        Some(Commands::Csv(cmd)) => {
            handle_csv_command(&store, cmd)?;
        }
        Some(Commands::Config) => {
            println!("Spendbook Configuration");
            println!("=======================");
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Assets directory: {}", paths.assets_dir().display());
            println!("Backup directory: {}", paths.backups_dir().display());
            println!("Database file:    {}", paths.database_file().display());
        }
        None => {
            println!("Spendbook - expense tracking with portable data");
            println!();
            println!("Run 'spendbook --help' for usage information.");
        }
    }

    Ok(())
}
