//! Backup history ledger
//!
//! Append-only catalog of completed snapshots. Entries outlive their archive
//! files: history stays browsable after an archive has been moved or deleted
//! out from under us, and deleting an entry never gets stuck on an archive
//! that is already gone.

use crate::error::SpendbookResult;
use crate::models::{BackupRecord, NewBackupRecord};
use crate::storage::Store;

/// Ledger of completed snapshot archives
pub struct BackupCatalog<'a> {
    store: &'a Store,
}

impl<'a> BackupCatalog<'a> {
    /// Create a new BackupCatalog over a store
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Record a completed snapshot; called by the snapshot writer only after
    /// the archive stream has closed without error
    pub fn insert(&self, record: NewBackupRecord) -> SpendbookResult<BackupRecord> {
        self.store.insert_backup_record(record)
    }

    /// All backup records, newest first
    pub fn list(&self) -> SpendbookResult<Vec<BackupRecord>> {
        self.store.list_backup_records(None)
    }

    /// The most recent `n` backup records
    pub fn list_recent(&self, n: usize) -> SpendbookResult<Vec<BackupRecord>> {
        self.store.list_backup_records(Some(n))
    }

    /// Remove a catalog entry and attempt to delete its archive file.
    ///
    /// The two deletions are not transactional: when the archive cannot be
    /// removed (already gone, permission revoked) the failure is logged and
    /// the ledger row is removed anyway.
    pub fn delete(&self, record: &BackupRecord) -> SpendbookResult<()> {
        if let Err(err) = std::fs::remove_file(&record.location) {
            log::warn!(
                "could not delete backup archive {}: {err}",
                record.location
            );
        }
        self.store.delete_backup_record(record.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoreAggregates;
    use crate::storage::test_util::open_temp_store;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn record_at(location: &str, offset_secs: i64) -> NewBackupRecord {
        NewBackupRecord {
            file_name: "backup-20240315-120000.zip".into(),
            location: location.into(),
            size_bytes: 512,
            created_at: Utc::now() + Duration::seconds(offset_secs),
            aggregates: StoreAggregates::default(),
        }
    }

    #[test]
    fn test_list_and_list_recent() {
        let (_temp_dir, store) = open_temp_store();
        let catalog = BackupCatalog::new(&store);

        catalog.insert(record_at("/tmp/a.zip", -120)).unwrap();
        catalog.insert(record_at("/tmp/b.zip", -60)).unwrap();
        catalog.insert(record_at("/tmp/c.zip", 0)).unwrap();

        let all = catalog.list().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].location, "/tmp/c.zip");
        assert_eq!(all[2].location, "/tmp/a.zip");

        let recent = catalog.list_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].location, "/tmp/c.zip");
    }

    #[test]
    fn test_delete_removes_archive_file() {
        let (_temp_dir, store) = open_temp_store();
        let catalog = BackupCatalog::new(&store);

        let archive_dir = TempDir::new().unwrap();
        let archive = archive_dir.path().join("backup.zip");
        std::fs::write(&archive, b"zip bytes").unwrap();

        let record = catalog
            .insert(record_at(archive.to_str().unwrap(), 0))
            .unwrap();
        catalog.delete(&record).unwrap();

        assert!(!archive.exists());
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_with_missing_archive_still_removes_entry() {
        let (_temp_dir, store) = open_temp_store();
        let catalog = BackupCatalog::new(&store);

        let record = catalog
            .insert(record_at("/nonexistent/gone.zip", 0))
            .unwrap();
        catalog.delete(&record).unwrap();

        assert!(catalog.list().unwrap().is_empty());
    }
}
