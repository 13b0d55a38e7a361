//! Core data models
//!
//! Plain data structs for the persisted entities. All identifiers are
//! store-generated rowids wrapped in newtypes (see `ids`).

pub mod asset;
pub mod backup_record;
pub mod category;
pub mod expense;
pub mod ids;
pub mod project;

pub use asset::{Asset, NewAsset};
pub use backup_record::{BackupRecord, NewBackupRecord, StoreAggregates};
pub use category::{Category, DEFAULT_CATEGORY_EMOJI};
pub use expense::{Expense, NewExpense};
pub use ids::{AssetId, BackupId, CategoryId, ExpenseId, ProjectId};
pub use project::Project;
