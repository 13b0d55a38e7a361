//! Asset model
//!
//! An asset is a binary image payload stored on disk (a receipt photo,
//! usually). Assets may be linked to an expense or stand alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ids::{AssetId, ExpenseId};

/// A stored image attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Unique identifier
    pub id: AssetId,

    /// Path to the binary image payload on disk
    pub image_path: PathBuf,

    /// Short title
    pub title: String,

    /// Free-text description
    pub description: String,

    /// When the asset was created
    pub created_at: DateTime<Utc>,

    /// Owning expense, if any; None means an unlinked, independent asset
    pub expense_id: Option<ExpenseId>,
}

impl Asset {
    /// Base name of the image payload, used as its archive entry name
    pub fn file_name(&self) -> Option<&str> {
        self.image_path.file_name().and_then(|n| n.to_str())
    }
}

/// Fields needed to create a new asset; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub image_path: PathBuf,
    pub title: String,
    pub description: String,
    pub expense_id: Option<ExpenseId>,
}

impl NewAsset {
    /// Create an asset input for an image file
    pub fn new(image_path: impl AsRef<Path>, title: impl Into<String>) -> Self {
        Self {
            image_path: image_path.as_ref().to_path_buf(),
            title: title.into(),
            description: String::new(),
            expense_id: None,
        }
    }

    /// Link the asset to an expense
    pub fn for_expense(mut self, expense_id: ExpenseId) -> Self {
        self.expense_id = Some(expense_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let asset = Asset {
            id: AssetId::new(1),
            image_path: PathBuf::from("/tmp/assets/receipt-001.jpg"),
            title: "Receipt".into(),
            description: String::new(),
            created_at: Utc::now(),
            expense_id: None,
        };
        assert_eq!(asset.file_name(), Some("receipt-001.jpg"));
    }

    #[test]
    fn test_new_asset_link() {
        let input = NewAsset::new("/tmp/a.png", "A").for_expense(ExpenseId::new(5));
        assert_eq!(input.expense_id, Some(ExpenseId::new(5)));
    }
}
