//! Snapshot creation
//!
//! Packages the store's on-disk files and every asset payload into one zip
//! archive on a caller-chosen endpoint, then records the completed backup in
//! the catalog. A backup record is only ever written after the archive stream
//! has closed without error; a failed snapshot leaves no ledger entry.

use std::fs::File;
use std::io::{self, Seek};
use std::path::Path;

use chrono::{DateTime, Utc};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{BackupCatalog, ASSETS_PREFIX, DB_ENTRY, SHM_ENTRY, WAL_ENTRY};
use crate::endpoint::{StreamEndpoint, WriteSeek};
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::BackupRecord;
use crate::storage::Store;

/// Creates snapshot archives from a store
pub struct SnapshotWriter<'a> {
    store: &'a Store,
}

impl<'a> SnapshotWriter<'a> {
    /// Create a new SnapshotWriter over a store
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Write a complete snapshot to the endpoint and record it.
    ///
    /// The write-ahead log is checkpointed first on a best-effort basis: a
    /// checkpoint failure is logged and the backup proceeds, which can leave
    /// very recent writes only in the log sidecar entry.
    pub fn write(&self, endpoint: &dyn StreamEndpoint) -> SpendbookResult<BackupRecord> {
        self.write_at(endpoint, Utc::now())
    }

    /// Like `write`, with an explicit backup instant. Callers that derive a
    /// destination name from the instant pass the same value here so the
    /// recorded `file_name` matches the archive on disk.
    pub fn write_at(
        &self,
        endpoint: &dyn StreamEndpoint,
        created_at: DateTime<Utc>,
    ) -> SpendbookResult<BackupRecord> {
        if let Err(err) = self.store.checkpoint() {
            log::warn!("write-ahead log checkpoint failed before snapshot: {err}");
        }

        let (size_bytes, aggregates) = self
            .write_archive(endpoint)
            .map_err(|err| SpendbookError::Backup(err.to_string()))?;

        let record = BackupCatalog::new(self.store).insert(crate::models::NewBackupRecord {
            file_name: archive_file_name(created_at),
            location: endpoint.location(),
            size_bytes,
            created_at,
            aggregates,
        })?;

        log::info!(
            "snapshot written to {} ({} bytes, {} expenses)",
            record.location,
            record.size_bytes,
            record.aggregates.expenses
        );
        Ok(record)
    }

    /// Stream all store files into a zip archive; returns the final byte
    /// size and the aggregates frozen at backup time
    fn write_archive(
        &self,
        endpoint: &dyn StreamEndpoint,
    ) -> SpendbookResult<(u64, crate::models::StoreAggregates)> {
        let paths = self.store.paths();
        let writer = endpoint.open_write()?;
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        add_file(&mut zip, &paths.database_file(), DB_ENTRY, options)?;

        // Sidecars only exist while a write-ahead log is live.
        for (path, entry) in [(paths.wal_file(), WAL_ENTRY), (paths.shm_file(), SHM_ENTRY)] {
            if path.exists() {
                add_file(&mut zip, &path, entry, options)?;
            }
        }

        let assets_dir = paths.assets_dir();
        if assets_dir.exists() {
            let mut asset_files: Vec<_> = std::fs::read_dir(&assets_dir)?
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            asset_files.sort();

            for path in asset_files {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    add_file(&mut zip, &path, &format!("{ASSETS_PREFIX}{name}"), options)?;
                }
            }
        }

        let aggregates = self.store.aggregates()?;

        let mut inner = zip.finish()?;
        let size_bytes = inner.stream_position()?;
        Ok((size_bytes, aggregates))
    }
}

/// Canonical archive file name for a backup taken at the given instant
pub fn archive_file_name(created_at: DateTime<Utc>) -> String {
    format!("backup-{}.zip", created_at.format("%Y%m%d-%H%M%S"))
}

fn add_file(
    zip: &mut ZipWriter<Box<dyn WriteSeek>>,
    path: &Path,
    entry_name: &str,
    options: FileOptions,
) -> SpendbookResult<()> {
    let mut file = File::open(path)
        .map_err(|e| SpendbookError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    zip.start_file(entry_name, options)?;
    io::copy(&mut file, zip)?;
    Ok(())
}
