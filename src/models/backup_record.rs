//! Backup record model
//!
//! A backup record is a ledger entry describing one completed, successfully
//! written snapshot archive. It freezes the store's aggregate figures at
//! backup time so history screens can show them after the store has moved on,
//! and it outlives the archive file itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::BackupId;

/// Aggregate figures for the whole store at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreAggregates {
    /// Number of projects
    pub projects: u64,
    /// Number of categories across all projects
    pub categories: u64,
    /// Number of expenses across all projects
    pub expenses: u64,
    /// Sum of all expense amounts
    pub total_amount: f64,
}

/// Ledger entry for one successfully written snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Unique identifier
    pub id: BackupId,

    /// Generated archive file name, encoding the backup timestamp
    pub file_name: String,

    /// Where the archive was written (endpoint location reference)
    pub location: String,

    /// Final archive size in bytes
    pub size_bytes: u64,

    /// When the backup was created
    pub created_at: DateTime<Utc>,

    /// Store aggregates frozen at backup time
    pub aggregates: StoreAggregates,
}

/// Fields for a new backup record; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewBackupRecord {
    pub file_name: String,
    pub location: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
    pub aggregates: StoreAggregates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregates_default() {
        let agg = StoreAggregates::default();
        assert_eq!(agg.projects, 0);
        assert_eq!(agg.total_amount, 0.0);
    }

    #[test]
    fn test_record_serialization() {
        let record = BackupRecord {
            id: BackupId::new(1),
            file_name: "backup-20240315-120000.zip".into(),
            location: "/tmp/backup-20240315-120000.zip".into(),
            size_bytes: 2048,
            created_at: Utc::now(),
            aggregates: StoreAggregates {
                projects: 2,
                categories: 5,
                expenses: 30,
                total_amount: 12345.67,
            },
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: BackupRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.file_name, record.file_name);
        assert_eq!(back.aggregates, record.aggregates);
    }
}
