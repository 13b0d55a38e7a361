//! Full-store snapshot engine
//!
//! A snapshot is a single zip archive capturing the SQLite files and every
//! asset payload at one point in time. `writer` produces archives and ledger
//! records, `reader` reconstructs a store from an archive, `catalog` manages
//! the ledger of completed backups.
//!
//! Fixed archive entry names; anything else in an archive is ignored by the
//! reader for forward compatibility.

pub mod catalog;
pub mod reader;
pub mod writer;

pub use catalog::BackupCatalog;
pub use reader::SnapshotReader;
pub use writer::{archive_file_name, SnapshotWriter};

/// Entry name of the primary database snapshot (required)
pub const DB_ENTRY: &str = "database.db";

/// Entry name of the write-ahead log sidecar (present only if one existed)
pub const WAL_ENTRY: &str = "database.db-wal";

/// Entry name of the shared-memory sidecar (present only if one existed)
pub const SHM_ENTRY: &str = "database.db-shm";

/// Prefix for asset payload entries, one per stored image
pub const ASSETS_PREFIX: &str = "assets/";
