//! Backup-record rows
//!
//! Raw row access for the backup ledger; the ordering and archive-deletion
//! policy live in `backup::catalog`.

use rusqlite::{params, OptionalExtension};

use super::Store;
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{BackupId, BackupRecord, NewBackupRecord, StoreAggregates};

impl Store {
    /// Insert a ledger row for a completed snapshot
    pub fn insert_backup_record(&self, input: NewBackupRecord) -> SpendbookResult<BackupRecord> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO backups
                (file_name, location, size_bytes, created_at,
                 project_count, category_count, expense_count, total_amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                input.file_name,
                input.location,
                input.size_bytes as i64,
                input.created_at,
                input.aggregates.projects as i64,
                input.aggregates.categories as i64,
                input.aggregates.expenses as i64,
                input.aggregates.total_amount,
            ],
        )?;

        Ok(BackupRecord {
            id: BackupId::new(conn.last_insert_rowid()),
            file_name: input.file_name,
            location: input.location,
            size_bytes: input.size_bytes,
            created_at: input.created_at,
            aggregates: input.aggregates,
        })
    }

    /// List backup records, newest first, optionally limited
    pub fn list_backup_records(&self, limit: Option<usize>) -> SpendbookResult<Vec<BackupRecord>> {
        let conn = self.conn()?;
        let sql = "SELECT id, file_name, location, size_bytes, created_at,
                          project_count, category_count, expense_count, total_amount
                   FROM backups ORDER BY created_at DESC, id DESC";
        let mut stmt = conn.prepare(sql)?;
        let mut records = stmt
            .query_map([], backup_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    /// Fetch one backup record by id
    pub fn get_backup_record(&self, id: BackupId) -> SpendbookResult<BackupRecord> {
        self.conn()?
            .query_row(
                "SELECT id, file_name, location, size_bytes, created_at,
                        project_count, category_count, expense_count, total_amount
                 FROM backups WHERE id = ?1",
                params![id],
                backup_from_row,
            )
            .optional()?
            .ok_or_else(|| SpendbookError::backup_not_found(id.to_string()))
    }

    /// Remove a backup record row
    pub fn delete_backup_record(&self, id: BackupId) -> SpendbookResult<()> {
        let deleted = self
            .conn()?
            .execute("DELETE FROM backups WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(SpendbookError::backup_not_found(id.to_string()));
        }
        Ok(())
    }
}

fn backup_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BackupRecord> {
    let size_bytes: i64 = row.get(3)?;
    let projects: i64 = row.get(5)?;
    let categories: i64 = row.get(6)?;
    let expenses: i64 = row.get(7)?;
    Ok(BackupRecord {
        id: row.get(0)?,
        file_name: row.get(1)?,
        location: row.get(2)?,
        size_bytes: size_bytes as u64,
        created_at: row.get(4)?,
        aggregates: StoreAggregates {
            projects: projects as u64,
            categories: categories as u64,
            expenses: expenses as u64,
            total_amount: row.get(8)?,
        },
    })
}
