//! Custom error types for spendbook
//!
//! This module defines the error hierarchy for the data portability engines
//! using thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for spendbook operations
#[derive(Error, Debug)]
pub enum SpendbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// SQLite storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Archive container errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors (e.g. missing required CSV columns)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A snapshot could not be fully written; no backup record was created
    #[error("Backup failed: {0}")]
    Backup(String),

    /// A restore did not complete; the store may not match the archive
    #[error("Restore failed: {0}")]
    Restore(String),

    /// The store was left in an ambiguous state
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl SpendbookError {
    /// Create a "not found" error for projects
    pub fn project_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Project",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for backup records
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SpendbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for SpendbookError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<zip::result::ZipError> for SpendbookError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

impl From<csv::Error> for SpendbookError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for SpendbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(format!("JSON serialization error: {}", err))
    }
}

/// Result type alias for spendbook operations
pub type SpendbookResult<T> = Result<T, SpendbookError>;
