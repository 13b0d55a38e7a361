//! Asset CRUD and the sequential expense-then-asset creation step

use chrono::Utc;
use rusqlite::params;

use super::Store;
use crate::error::SpendbookResult;
use crate::models::{Asset, AssetId, Expense, NewAsset, NewExpense};

impl Store {
    /// Create a new asset row for an image payload already on disk
    pub fn create_asset(&self, input: NewAsset) -> SpendbookResult<Asset> {
        let now = Utc::now();
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO assets (image_path, title, description, created_at, expense_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                input.image_path.to_string_lossy(),
                input.title,
                input.description,
                now,
                input.expense_id,
            ],
        )?;

        Ok(Asset {
            id: AssetId::new(conn.last_insert_rowid()),
            image_path: input.image_path,
            title: input.title,
            description: input.description,
            created_at: now,
            expense_id: input.expense_id,
        })
    }

    /// Create an expense and attach an asset to it, strictly in that order.
    /// The asset is only created once the expense insert has succeeded and
    /// produced an id, so a failed expense can never orphan an asset.
    pub fn create_expense_with_asset(
        &self,
        expense: NewExpense,
        asset: NewAsset,
    ) -> SpendbookResult<(Expense, Asset)> {
        let expense = self.create_expense(expense)?;
        let asset = self.create_asset(asset.for_expense(expense.id))?;
        Ok((expense, asset))
    }

    /// List all assets, oldest first
    pub fn list_assets(&self) -> SpendbookResult<Vec<Asset>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, image_path, title, description, created_at, expense_id
             FROM assets ORDER BY created_at",
        )?;
        let assets = stmt
            .query_map([], asset_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(assets)
    }

    /// Delete an asset row (the image payload on disk is the caller's concern)
    pub fn delete_asset(&self, id: AssetId) -> SpendbookResult<()> {
        self.conn()?
            .execute("DELETE FROM assets WHERE id = ?1", params![id])?;
        Ok(())
    }
}

fn asset_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Asset> {
    let path: String = row.get(1)?;
    Ok(Asset {
        id: row.get(0)?,
        image_path: path.into(),
        title: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        expense_id: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;
    use crate::storage::test_util::open_temp_store;

    #[test]
    fn test_create_unlinked_asset() {
        let (_temp_dir, store) = open_temp_store();

        let asset = store
            .create_asset(NewAsset::new("/tmp/receipt.jpg", "Receipt"))
            .unwrap();

        assert!(asset.expense_id.is_none());
        assert_eq!(store.list_assets().unwrap().len(), 1);
    }

    #[test]
    fn test_expense_with_asset_links_generated_id() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();
        let category = store.create_category(project.id, "Food", "🍔").unwrap();

        let (expense, asset) = store
            .create_expense_with_asset(
                NewExpense::new(category.id, 250.5, "Lunch"),
                NewAsset::new("/tmp/lunch.jpg", "Lunch receipt"),
            )
            .unwrap();

        assert_eq!(asset.expense_id, Some(expense.id));
    }

    #[test]
    fn test_failed_expense_creates_no_asset() {
        let (_temp_dir, store) = open_temp_store();

        // No such category: the expense insert fails its FK check, and the
        // asset step must never run.
        let result = store.create_expense_with_asset(
            NewExpense::new(CategoryId::new(999), 10.0, "Ghost"),
            NewAsset::new("/tmp/ghost.jpg", "Ghost receipt"),
        );

        assert!(result.is_err());
        assert!(store.list_assets().unwrap().is_empty());
    }

    #[test]
    fn test_expense_delete_cascades_to_assets() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();
        let category = store.create_category(project.id, "Food", "🍔").unwrap();

        let (expense, _asset) = store
            .create_expense_with_asset(
                NewExpense::new(category.id, 250.5, "Lunch"),
                NewAsset::new("/tmp/lunch.jpg", "Lunch receipt"),
            )
            .unwrap();

        store.delete_expense(expense.id).unwrap();
        assert!(store.list_assets().unwrap().is_empty());
    }
}
