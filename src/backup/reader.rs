//! Snapshot restoration
//!
//! Unpacks a previously produced archive back onto the store's backing files
//! and asset directory, replacing current state entirely.
//!
//! Extraction overwrites the live files in place, so a failure mid-way can
//! leave the store inconsistent; the reader always reattaches the store to
//! whatever files are present before reporting the failure. Callers must not
//! run another snapshot or restore against the same store until this one has
//! finished.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::{ASSETS_PREFIX, DB_ENTRY, SHM_ENTRY, WAL_ENTRY};
use crate::config::paths::StorePaths;
use crate::endpoint::StreamEndpoint;
use crate::error::{SpendbookError, SpendbookResult};
use crate::storage::Store;

/// Restores a store from a snapshot archive
pub struct SnapshotReader<'a> {
    store: &'a mut Store,
}

impl<'a> SnapshotReader<'a> {
    /// Create a new SnapshotReader over a store
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Replace the store's state with the archive's contents.
    ///
    /// On success nothing from the prior state survives unless it was also
    /// present in the archive. On failure the store is reattached to the
    /// files left on disk, which may mix old and new state.
    pub fn restore(&mut self, endpoint: &dyn StreamEndpoint) -> SpendbookResult<()> {
        self.store.detach();
        let extracted = extract_archive(self.store.paths(), endpoint);
        let reattached = self.store.reattach();

        match (extracted, reattached) {
            (Ok(()), Ok(())) => {
                log::info!("store restored from {}", endpoint.location());
                Ok(())
            }
            (Err(err), _) => Err(SpendbookError::Restore(err.to_string())),
            (Ok(()), Err(err)) => Err(SpendbookError::Restore(format!(
                "store did not reopen after extraction: {err}"
            ))),
        }
    }
}

fn extract_archive(paths: &StorePaths, endpoint: &dyn StreamEndpoint) -> SpendbookResult<()> {
    std::fs::create_dir_all(paths.assets_dir())?;
    std::fs::create_dir_all(paths.data_dir())?;

    let reader = endpoint.open_read()?;
    let mut archive = ZipArchive::new(reader)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let Some(target) = classify_entry(&name, paths) else {
            // Unrecognized entries are skipped so newer archives stay readable.
            log::debug!("skipping unrecognized archive entry: {name}");
            continue;
        };

        let mut out = File::create(&target).map_err(|e| {
            SpendbookError::Io(format!("Failed to write {}: {}", target.display(), e))
        })?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(())
}

/// Map a fixed archive entry name to the on-disk file it overwrites.
/// Asset entries are reduced to their base name, so an archive can never
/// write outside the asset directory.
fn classify_entry(name: &str, paths: &StorePaths) -> Option<PathBuf> {
    match name {
        DB_ENTRY => Some(paths.database_file()),
        WAL_ENTRY => Some(paths.wal_file()),
        SHM_ENTRY => Some(paths.shm_file()),
        _ => name
            .strip_prefix(ASSETS_PREFIX)
            .and_then(|rest| Path::new(rest).file_name())
            .map(|base| paths.assets_dir().join(base)),
    }
}
