//! Byte-stream endpoints
//!
//! The engines never pick their own destinations: archives and CSV documents
//! are read from and written to an opaque, caller-chosen endpoint (a path
//! picked in a dialog, a share target, a fixed backup directory). The trait
//! keeps that choice out of the engines and lets tests point them at temp
//! files.

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use crate::error::{SpendbookError, SpendbookResult};

/// Readable, seekable byte source (zip extraction needs `Seek`)
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Writable, seekable byte sink (zip central directory needs `Seek`)
pub trait WriteSeek: Write + Seek {}
impl<T: Write + Seek> WriteSeek for T {}

/// An opaque destination the engines can open for reading or writing
pub trait StreamEndpoint {
    /// Open the endpoint for reading
    fn open_read(&self) -> SpendbookResult<Box<dyn ReadSeek>>;

    /// Open the endpoint for writing, truncating any existing content
    fn open_write(&self) -> SpendbookResult<Box<dyn WriteSeek>>;

    /// Human-readable location reference, recorded in backup history
    fn location(&self) -> String;
}

/// Endpoint backed by a local filesystem path
#[derive(Debug, Clone)]
pub struct FileEndpoint {
    path: PathBuf,
}

impl FileEndpoint {
    /// Create an endpoint for a path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The underlying path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StreamEndpoint for FileEndpoint {
    fn open_read(&self) -> SpendbookResult<Box<dyn ReadSeek>> {
        let file = File::open(&self.path).map_err(|e| {
            SpendbookError::Io(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        Ok(Box::new(file))
    }

    fn open_write(&self) -> SpendbookResult<Box<dyn WriteSeek>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SpendbookError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let file = File::create(&self.path).map_err(|e| {
            SpendbookError::Io(format!("Failed to create {}: {}", self.path.display(), e))
        })?;
        Ok(Box::new(file))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
