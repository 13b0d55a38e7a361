//! Project CRUD

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::Store;
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Project, ProjectId};

impl Store {
    /// Create a new project
    pub fn create_project(
        &self,
        name: impl Into<String>,
        emoji: impl Into<String>,
    ) -> SpendbookResult<Project> {
        let name = name.into();
        let emoji = emoji.into();
        let now = Utc::now();

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO projects (name, emoji, updated_at) VALUES (?1, ?2, ?3)",
            params![name, emoji, now],
        )?;

        Ok(Project {
            id: ProjectId::new(conn.last_insert_rowid()),
            name,
            emoji,
            updated_at: now,
        })
    }

    /// Fetch a project by id
    pub fn get_project(&self, id: ProjectId) -> SpendbookResult<Project> {
        self.conn()?
            .query_row(
                "SELECT id, name, emoji, updated_at FROM projects WHERE id = ?1",
                params![id],
                project_from_row,
            )
            .optional()?
            .ok_or_else(|| SpendbookError::project_not_found(id.to_string()))
    }

    /// Look up a project by exact name
    pub fn find_project_by_name(&self, name: &str) -> SpendbookResult<Option<Project>> {
        Ok(self
            .conn()?
            .query_row(
                "SELECT id, name, emoji, updated_at FROM projects WHERE name = ?1",
                params![name],
                project_from_row,
            )
            .optional()?)
    }

    /// List all projects, sorted by name
    pub fn list_projects(&self) -> SpendbookResult<Vec<Project>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, emoji, updated_at FROM projects ORDER BY name")?;
        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    /// Delete a project; categories, expenses and assets cascade
    pub fn delete_project(&self, id: ProjectId) -> SpendbookResult<()> {
        let deleted = self
            .conn()?
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(SpendbookError::project_not_found(id.to_string()));
        }
        Ok(())
    }

    /// Bump a project's last-modified instant
    pub(crate) fn touch_project(&self, id: ProjectId) -> SpendbookResult<()> {
        self.conn()?.execute(
            "UPDATE projects SET updated_at = ?1 WHERE id = ?2",
            params![Utc::now(), id],
        )?;
        Ok(())
    }
}

fn project_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        emoji: row.get(2)?,
        updated_at: row.get(3)?,
    })
}
