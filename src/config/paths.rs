//! Path management for spendbook
//!
//! Provides XDG-compliant path resolution for the store database, asset
//! payloads, and backup archives.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/spendbook` or `~/.config/spendbook`
//! 3. Windows: `%APPDATA%\spendbook`

use std::path::PathBuf;

use crate::error::SpendbookError;

/// Base name of the primary SQLite file; archive entries reuse it verbatim.
pub const DATABASE_FILE_NAME: &str = "database.db";

/// Manages all paths used by spendbook
#[derive(Debug, Clone)]
pub struct StorePaths {
    /// Base directory for all spendbook data
    base_dir: PathBuf,
}

impl StorePaths {
    /// Create a new StorePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SpendbookError> {
        let base_dir = if let Ok(custom) = std::env::var("SPENDBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create StorePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/spendbook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the SQLite files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory holding attached image payloads
    pub fn assets_dir(&self) -> PathBuf {
        self.base_dir.join("assets")
    }

    /// Get the default directory for backup archives
    pub fn backups_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the primary SQLite database file
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join(DATABASE_FILE_NAME)
    }

    /// Get the path to the SQLite write-ahead log sidecar
    pub fn wal_file(&self) -> PathBuf {
        self.data_dir().join(format!("{DATABASE_FILE_NAME}-wal"))
    }

    /// Get the path to the SQLite shared-memory sidecar
    pub fn shm_file(&self) -> PathBuf {
        self.data_dir().join(format!("{DATABASE_FILE_NAME}-shm"))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), SpendbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendbookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SpendbookError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.assets_dir())
            .map_err(|e| SpendbookError::Io(format!("Failed to create assets directory: {}", e)))?;

        std::fs::create_dir_all(self.backups_dir())
            .map_err(|e| SpendbookError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SpendbookError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("spendbook"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SpendbookError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SpendbookError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("spendbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.assets_dir(), temp_dir.path().join("assets"));
        assert_eq!(paths.backups_dir(), temp_dir.path().join("backups"));
    }

    #[test]
    fn test_sqlite_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());

        let data = temp_dir.path().join("data");
        assert_eq!(paths.database_file(), data.join("database.db"));
        assert_eq!(paths.wal_file(), data.join("database.db-wal"));
        assert_eq!(paths.shm_file(), data.join("database.db-shm"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.assets_dir().exists());
        assert!(paths.backups_dir().exists());
    }
}
