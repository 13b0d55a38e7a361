//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the engine layer.

pub mod backup;
pub mod csv;
pub mod project;

pub use backup::{handle_backup_command, BackupCommands};
pub use csv::{handle_csv_command, CsvCommands};
pub use project::{handle_project_command, ProjectCommands};
