//! Spendbook - data portability and recovery for a personal expense tracker
//!
//! This library implements the snapshot and interchange engines behind the
//! spendbook CLI: full-state zip snapshots of the SQLite store plus its asset
//! files, and per-project CSV export/import with tolerant header detection.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management for the data directory
//! - `error`: Custom error types
//! - `models`: Core data models (projects, categories, expenses, assets)
//! - `storage`: SQLite storage layer
//! - `endpoint`: Byte-stream endpoints archives are read from and written to
//! - `backup`: Snapshot creation, restore, and the backup catalog
//! - `interchange`: CSV export and import
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use spendbook::config::StorePaths;
//! use spendbook::storage::Store;
//!
//! let paths = StorePaths::new()?;
//! let store = Store::open(paths)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod interchange;
pub mod models;
pub mod storage;

pub use error::{SpendbookError, SpendbookResult};
