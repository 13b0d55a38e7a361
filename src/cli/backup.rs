//! Backup CLI commands
//!
//! Implements CLI commands for snapshot creation, history, and restore.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use crate::backup::{archive_file_name, BackupCatalog, SnapshotReader, SnapshotWriter};
use crate::endpoint::FileEndpoint;
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{BackupId, BackupRecord};
use crate::storage::Store;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new snapshot archive
    Create {
        /// Archive output path (defaults to the backup directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List recorded backups, newest first
    List {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Restore the store from a snapshot archive
    Restore {
        /// Path to the archive, or a backup id (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a backup record and its archive file
    Delete {
        /// Backup id as shown by 'backup list'
        id: i64,
    },
}

/// Handle a backup command
pub fn handle_backup_command(store: &mut Store, cmd: BackupCommands) -> SpendbookResult<()> {
    match cmd {
        BackupCommands::Create { output } => {
            // One instant names both the archive file and the ledger row.
            let created_at = Utc::now();
            let path = output.unwrap_or_else(|| {
                store
                    .paths()
                    .backups_dir()
                    .join(archive_file_name(created_at))
            });

            println!("Creating backup...");
            let record =
                SnapshotWriter::new(store).write_at(&FileEndpoint::new(&path), created_at)?;
            println!("Backup created: {}", record.file_name);
            println!("Location: {}", record.location);
            println!(
                "Captured: {} project(s), {} categorie(s), {} expense(s)",
                record.aggregates.projects,
                record.aggregates.categories,
                record.aggregates.expenses
            );
            println!("Size: {}", format_size(record.size_bytes));
        }

        BackupCommands::List { limit, json } => {
            let catalog = BackupCatalog::new(store);
            let backups = match limit {
                Some(n) => catalog.list_recent(n)?,
                None => catalog.list()?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&backups)?);
                return Ok(());
            }

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: spendbook backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for backup in &backups {
                let age = Utc::now().signed_duration_since(backup.created_at);
                println!(
                    "  {}. {} ({} ago, {}, {} expenses, total {:.2})",
                    backup.id,
                    backup.file_name,
                    format_duration(age),
                    format_size(backup.size_bytes),
                    backup.aggregates.expenses,
                    backup.aggregates.total_amount,
                );
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let path = resolve_archive_path(store, &backup)?;

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  spendbook backup restore {} --force", backup);
                return Ok(());
            }

            println!("Restoring from {}...", path.display());
            SnapshotReader::new(store).restore(&FileEndpoint::new(&path))?;

            let aggregates = store.aggregates()?;
            println!("Restore complete!");
            println!(
                "Store now holds {} project(s), {} categorie(s), {} expense(s).",
                aggregates.projects, aggregates.categories, aggregates.expenses
            );
        }

        BackupCommands::Delete { id } => {
            let catalog = BackupCatalog::new(store);
            let record = store.get_backup_record(BackupId::new(id))?;
            catalog.delete(&record)?;
            println!("Deleted backup: {}", record.file_name);
        }
    }

    Ok(())
}

/// Resolve a backup argument to an archive path: 'latest', a backup id,
/// or a filesystem path
fn resolve_archive_path(store: &Store, backup: &str) -> SpendbookResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return BackupCatalog::new(store)
            .list_recent(1)?
            .into_iter()
            .next()
            .map(|record| PathBuf::from(record.location))
            .ok_or_else(|| SpendbookError::backup_not_found("latest"));
    }

    if let Ok(id) = backup.parse::<i64>() {
        let record: BackupRecord = store.get_backup_record(BackupId::new(id))?;
        return Ok(PathBuf::from(record.location));
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    let in_backup_dir = store.paths().backups_dir().join(backup);
    if in_backup_dir.exists() {
        return Ok(in_backup_dir);
    }

    Err(SpendbookError::backup_not_found(backup))
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    let months = days / 30;
    format!("{}mo", months)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
