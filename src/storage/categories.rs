//! Category CRUD and name lookup
//!
//! The importer's lookup-or-create flow lives on `find_category_by_name` /
//! `create_category` / `update_category_emoji`; names are unique within a
//! project by convention only.

use rusqlite::{params, OptionalExtension};

use super::Store;
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Category, CategoryId, ProjectId};

impl Store {
    /// Create a new category in a project
    pub fn create_category(
        &self,
        project_id: ProjectId,
        name: impl Into<String>,
        emoji: impl Into<String>,
    ) -> SpendbookResult<Category> {
        let name = name.into();
        let emoji = emoji.into();

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO categories (name, project_id, emoji) VALUES (?1, ?2, ?3)",
            params![name, project_id, emoji],
        )?;
        let id = CategoryId::new(conn.last_insert_rowid());
        self.touch_project(project_id)?;

        Ok(Category {
            id,
            name,
            project_id,
            emoji,
        })
    }

    /// Look up a category by exact name within a project
    pub fn find_category_by_name(
        &self,
        project_id: ProjectId,
        name: &str,
    ) -> SpendbookResult<Option<Category>> {
        Ok(self
            .conn()?
            .query_row(
                "SELECT id, name, project_id, emoji FROM categories
                 WHERE project_id = ?1 AND name = ?2",
                params![project_id, name],
                category_from_row,
            )
            .optional()?)
    }

    /// List a project's categories, sorted by name
    pub fn list_categories(&self, project_id: ProjectId) -> SpendbookResult<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, project_id, emoji FROM categories
             WHERE project_id = ?1 ORDER BY name",
        )?;
        let categories = stmt
            .query_map(params![project_id], category_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Replace a category's emoji glyph
    pub fn update_category_emoji(&self, id: CategoryId, emoji: &str) -> SpendbookResult<()> {
        let updated = self.conn()?.execute(
            "UPDATE categories SET emoji = ?1 WHERE id = ?2",
            params![emoji, id],
        )?;
        if updated == 0 {
            return Err(SpendbookError::category_not_found(id.to_string()));
        }
        Ok(())
    }

    /// Delete a category; its expenses and their assets cascade
    pub fn delete_category(&self, id: CategoryId) -> SpendbookResult<()> {
        let deleted = self
            .conn()?
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(SpendbookError::category_not_found(id.to_string()));
        }
        Ok(())
    }
}

fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        project_id: row.get(2)?,
        emoji: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::storage::test_util::open_temp_store;

    #[test]
    fn test_create_and_find_category() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let category = store.create_category(project.id, "Food", "🍔").unwrap();
        let found = store
            .find_category_by_name(project.id, "Food")
            .unwrap()
            .unwrap();

        assert_eq!(found.id, category.id);
        assert_eq!(found.emoji, "🍔");
    }

    #[test]
    fn test_name_lookup_is_scoped_to_project() {
        let (_temp_dir, store) = open_temp_store();
        let trip = store.create_project("Trip", "✈️").unwrap();
        let home = store.create_project("Home", "🏠").unwrap();

        store.create_category(trip.id, "Food", "🍔").unwrap();

        assert!(store
            .find_category_by_name(home.id, "Food")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_update_category_emoji() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();
        let category = store.create_category(project.id, "Food", "🍔").unwrap();

        store.update_category_emoji(category.id, "🍜").unwrap();

        let found = store
            .find_category_by_name(project.id, "Food")
            .unwrap()
            .unwrap();
        assert_eq!(found.emoji, "🍜");
    }

    #[test]
    fn test_category_creation_touches_project() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        store.create_category(project.id, "Food", "🍔").unwrap();

        let reloaded = store.get_project(project.id).unwrap();
        assert!(reloaded.updated_at >= project.updated_at);
    }
}
