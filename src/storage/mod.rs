//! SQLite storage layer
//!
//! The `Store` owns the single connection to the on-disk database and exposes
//! per-entity CRUD in the submodules. It is always an explicit, passed-in
//! dependency of the engines so tests can substitute an isolated store per
//! test case.
//!
//! The database runs in WAL journal mode, so the primary `database.db` file
//! may be accompanied by `-wal`/`-shm` sidecars. `checkpoint` flushes the log
//! back into the primary file; `detach`/`reattach` let the snapshot reader
//! replace the backing files while no live handle is open.

pub mod assets;
pub mod backups;
pub mod categories;
pub mod expenses;
pub mod projects;

pub use expenses::ExpenseRow;

use rusqlite::Connection;

use crate::config::paths::StorePaths;
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::StoreAggregates;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    emoji       TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    emoji       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    amount          REAL NOT NULL,
    date            TEXT NOT NULL,
    description     TEXT NOT NULL,
    category_id     INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    payment_method  TEXT,
    payment_icon    TEXT
);

CREATE TABLE IF NOT EXISTS assets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    image_path  TEXT NOT NULL,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    expense_id  INTEGER REFERENCES expenses(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS backups (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name       TEXT NOT NULL,
    location        TEXT NOT NULL,
    size_bytes      INTEGER NOT NULL,
    created_at      TEXT NOT NULL,
    project_count   INTEGER NOT NULL,
    category_count  INTEGER NOT NULL,
    expense_count   INTEGER NOT NULL,
    total_amount    REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_categories_project ON categories(project_id);
CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category_id);
CREATE INDEX IF NOT EXISTS idx_assets_expense ON assets(expense_id);
";

/// Handle to the persisted expense store
pub struct Store {
    conn: Option<Connection>,
    paths: StorePaths,
}

impl Store {
    /// Open (creating if necessary) the store at the given paths
    pub fn open(paths: StorePaths) -> SpendbookResult<Self> {
        paths.ensure_directories()?;
        let conn = open_connection(&paths)?;
        Ok(Self {
            conn: Some(conn),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Whether a live connection is currently held
    pub fn is_attached(&self) -> bool {
        self.conn.is_some()
    }

    /// Borrow the live connection, failing if the store is detached
    pub(crate) fn conn(&self) -> SpendbookResult<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| SpendbookError::Storage("store handle is detached".into()))
    }

    /// Close the live connection so the backing files can be replaced
    pub fn detach(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((conn, err)) = conn.close() {
                // Dropping the handle still releases it; nothing else to do.
                log::warn!("closing store handle failed: {err}");
                drop(conn);
            }
        }
    }

    /// Reopen the connection against whatever backing files are present
    pub fn reattach(&mut self) -> SpendbookResult<()> {
        if self.conn.is_none() {
            self.conn = Some(open_connection(&self.paths)?);
        }
        Ok(())
    }

    /// Flush pending write-ahead-log pages into the primary database file
    pub fn checkpoint(&self) -> SpendbookResult<()> {
        self.conn()?
            .query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
        Ok(())
    }

    /// Current aggregate counts and total amount for the whole store
    pub fn aggregates(&self) -> SpendbookResult<StoreAggregates> {
        let conn = self.conn()?;
        let projects: i64 = conn.query_row("SELECT COUNT(*) FROM projects", [], |r| r.get(0))?;
        let categories: i64 =
            conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
        let expenses: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?;
        let total_amount: f64 =
            conn.query_row("SELECT COALESCE(SUM(amount), 0) FROM expenses", [], |r| {
                r.get(0)
            })?;

        Ok(StoreAggregates {
            projects: projects as u64,
            categories: categories as u64,
            expenses: expenses as u64,
            total_amount,
        })
    }
}

fn open_connection(paths: &StorePaths) -> SpendbookResult<Connection> {
    let conn = Connection::open(paths.database_file())?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use tempfile::TempDir;

    /// Fresh store in a temp directory; keep the TempDir alive for the test
    pub fn open_temp_store() -> (TempDir, Store) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = Store::open(paths).unwrap();
        (temp_dir, store)
    }
}
