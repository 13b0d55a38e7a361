//! CSV import
//!
//! Parses a CSV document into category/expense mutations against one target
//! project. The header row is matched against alias sets so hand-edited and
//! legacy files resolve; rows are processed strictly in sequence so a
//! category created by one row is visible to the next. Import is additive:
//! every accepted row creates exactly one new expense, nothing is merged.

use std::collections::HashMap;
use std::io::Read;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use csv::StringRecord;

use super::{DATE_FORMAT_LONG, DATE_FORMAT_SHORT};
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{ExpenseId, NewExpense, ProjectId, DEFAULT_CATEGORY_EMOJI};
use crate::storage::Store;

/// Logical CSV columns the importer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    Category,
    CategoryEmoji,
    ProjectEmoji,
    Description,
    Amount,
    Date,
    PaymentMethod,
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Number of expenses created
    pub imported: usize,
    /// Number of rows skipped (empty, blank category, unparseable amount)
    pub skipped: usize,
    /// Number of categories created along the way
    pub categories_created: usize,
    /// IDs of the created expenses, in row order
    pub expense_ids: Vec<ExpenseId>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    store: &'a Store,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Import a CSV document into the target project.
    ///
    /// Header-level problems (missing required column, unreadable document)
    /// abort before any row mutates the store. Row-level problems only skip
    /// the offending row.
    pub fn import<R: Read>(
        &self,
        reader: R,
        project_id: ProjectId,
    ) -> SpendbookResult<ImportSummary> {
        // Fail fast on a bad target before touching the document.
        self.store.get_project(project_id)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut records = csv_reader.records();

        let header = match records.next() {
            Some(record) => record?,
            None => {
                return Err(SpendbookError::Validation(
                    "CSV document has no header row".into(),
                ))
            }
        };
        let columns = resolve_header(&header);

        for (column, name) in [
            (Column::Category, "category"),
            (Column::Description, "description"),
            (Column::Amount, "amount"),
        ] {
            if !columns.contains_key(&column) {
                return Err(SpendbookError::Validation(format!(
                    "missing required column: {name}"
                )));
            }
        }

        let mut summary = ImportSummary::default();

        for record in records {
            let record = record?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                summary.skipped += 1;
                continue;
            }

            let cell = |column: Column| -> &str {
                columns
                    .get(&column)
                    .and_then(|&idx| record.get(idx))
                    .map(str::trim)
                    .unwrap_or("")
            };

            let category_name = cell(Column::Category);
            if category_name.is_empty() {
                summary.skipped += 1;
                continue;
            }

            let Ok(amount) = cell(Column::Amount).parse::<f64>() else {
                summary.skipped += 1;
                continue;
            };

            // The project-emoji column is resolved into the index map but
            // deliberately never applied to the project.
            let emoji = cell(Column::CategoryEmoji);
            let category_id = match self.store.find_category_by_name(project_id, category_name)? {
                Some(existing) => {
                    if !emoji.is_empty() && emoji != existing.emoji {
                        self.store.update_category_emoji(existing.id, emoji)?;
                    }
                    existing.id
                }
                None => {
                    let glyph = if emoji.is_empty() {
                        DEFAULT_CATEGORY_EMOJI
                    } else {
                        emoji
                    };
                    summary.categories_created += 1;
                    self.store
                        .create_category(project_id, category_name, glyph)?
                        .id
                }
            };

            let payment_method = match cell(Column::PaymentMethod) {
                "" => None,
                method => Some(method.to_string()),
            };

            let expense = self.store.create_expense(NewExpense {
                amount,
                date: parse_row_date(cell(Column::Date)),
                description: cell(Column::Description).to_string(),
                category_id,
                payment_method,
                payment_icon: None,
            })?;

            summary.imported += 1;
            summary.expense_ids.push(expense.id);
        }

        log::info!(
            "imported {} expenses ({} rows skipped, {} categories created) into project {project_id}",
            summary.imported,
            summary.skipped,
            summary.categories_created
        );
        Ok(summary)
    }
}

/// Match each header cell (trimmed, lowercased) against the alias sets.
/// The first cell claiming a logical column wins.
fn resolve_header(record: &StringRecord) -> HashMap<Column, usize> {
    let mut columns = HashMap::new();
    for (idx, cell) in record.iter().enumerate() {
        let column = match cell.trim().to_lowercase().as_str() {
            "category" | "category name" => Some(Column::Category),
            "emoji" | "category emoji" => Some(Column::CategoryEmoji),
            "project emoji" => Some(Column::ProjectEmoji),
            "description" | "details" | "note" => Some(Column::Description),
            "amount" | "price" | "value" => Some(Column::Amount),
            "date" | "txn date" | "transaction date" => Some(Column::Date),
            "payment method" | "payment" | "method" => Some(Column::PaymentMethod),
            _ => None,
        };
        if let Some(column) = column {
            columns.entry(column).or_insert(idx);
        }
    }
    columns
}

/// Parse a row's date cell: day/month/two-digit-year first, then
/// day/month/four-digit-year, else default to now. Never fails the row.
fn parse_row_date(cell: &str) -> DateTime<Utc> {
    for format in [DATE_FORMAT_SHORT, DATE_FORMAT_LONG] {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Utc.from_utc_datetime(&midnight);
            }
        }
    }
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interchange::export_expenses_csv;
    use crate::storage::test_util::open_temp_store;
    use chrono::Duration;

    fn import_str(store: &Store, csv: &str, project: ProjectId) -> SpendbookResult<ImportSummary> {
        ImportService::new(store).import(csv.as_bytes(), project)
    }

    #[test]
    fn test_new_format_row() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let csv = "Project,Project Emoji,Category,Category Emoji,Description,Amount,Date,Payment Method\n\
                   Trip,✈️,Food,🍔,Lunch,250.5,15/03/2024,Cash\n";
        let summary = import_str(&store, csv, project.id).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.categories_created, 1);

        let category = store
            .find_category_by_name(project.id, "Food")
            .unwrap()
            .unwrap();
        assert_eq!(category.emoji, "🍔");

        let expenses = store.list_expenses(category.id).unwrap();
        assert_eq!(expenses[0].description, "Lunch");
        assert_eq!(expenses[0].amount, 250.5);
        assert_eq!(
            expenses[0].date,
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(expenses[0].payment_method.as_deref(), Some("Cash"));
    }

    #[test]
    fn test_legacy_format_defaults() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let csv = "category,description,amount\nFood,Lunch,250.5\n";
        let before = Utc::now() - Duration::seconds(5);
        let summary = import_str(&store, csv, project.id).unwrap();

        assert_eq!(summary.imported, 1);
        let category = store
            .find_category_by_name(project.id, "Food")
            .unwrap()
            .unwrap();
        assert_eq!(category.emoji, DEFAULT_CATEGORY_EMOJI);

        let expense = &store.list_expenses(category.id).unwrap()[0];
        assert!(expense.date >= before);
        assert!(expense.payment_method.is_none());
    }

    #[test]
    fn test_alias_header_coverage() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let csv = "Category Name,Details,Price,Txn Date,Method\n\
                   Food,Lunch,250.5,15/03/24,Cash\n";
        let summary = import_str(&store, csv, project.id).unwrap();

        assert_eq!(summary.imported, 1);
        let category = store
            .find_category_by_name(project.id, "Food")
            .unwrap()
            .unwrap();
        let expense = &store.list_expenses(category.id).unwrap()[0];
        assert_eq!(
            expense.date,
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(expense.payment_method.as_deref(), Some("Cash"));
    }

    #[test]
    fn test_missing_amount_column_rejected_wholesale() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let csv = "category,description\nFood,Lunch\n";
        let err = import_str(&store, csv, project.id).unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("amount"));
        assert_eq!(store.aggregates().unwrap().expenses, 0);
        assert_eq!(store.aggregates().unwrap().categories, 0);
    }

    #[test]
    fn test_malformed_amount_row_is_isolated() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let csv = "category,description,amount\n\
                   Food,Lunch,abc\n\
                   Food,Dinner,30.0\n";
        let summary = import_str(&store, csv, project.id).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        let category = store
            .find_category_by_name(project.id, "Food")
            .unwrap()
            .unwrap();
        assert_eq!(store.list_expenses(category.id).unwrap().len(), 1);
    }

    #[test]
    fn test_blank_category_and_empty_rows_skipped() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let csv = "category,description,amount\n\
                   ,Orphan,10\n\
                   ,,\n\
                   Food,Kept,20\n";
        let summary = import_str(&store, csv, project.id).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn test_unparseable_date_falls_back_to_now() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let csv = "category,description,amount,date\nFood,Lunch,10,someday\n";
        let before = Utc::now() - Duration::seconds(5);
        let summary = import_str(&store, csv, project.id).unwrap();

        assert_eq!(summary.imported, 1);
        let category = store
            .find_category_by_name(project.id, "Food")
            .unwrap()
            .unwrap();
        assert!(store.list_expenses(category.id).unwrap()[0].date >= before);
    }

    #[test]
    fn test_category_reused_within_one_import() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        // Row one creates the category; row two must see and reuse it.
        let csv = "category,description,amount\n\
                   Food,Lunch,10\n\
                   Food,Dinner,20\n";
        let summary = import_str(&store, csv, project.id).unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.categories_created, 1);
        assert_eq!(store.aggregates().unwrap().categories, 1);
    }

    #[test]
    fn test_second_import_reuses_categories_but_duplicates_expenses() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let csv = "category,description,amount\nFood,Lunch,10\n";
        import_str(&store, csv, project.id).unwrap();
        let second = import_str(&store, csv, project.id).unwrap();

        assert_eq!(second.categories_created, 0);
        let agg = store.aggregates().unwrap();
        assert_eq!(agg.categories, 1);
        assert_eq!(agg.expenses, 2);
    }

    #[test]
    fn test_row_emoji_updates_existing_category() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();
        store.create_category(project.id, "Food", "🍔").unwrap();

        let csv = "category,emoji,description,amount\nFood,🍜,Ramen,12\n";
        import_str(&store, csv, project.id).unwrap();

        let category = store
            .find_category_by_name(project.id, "Food")
            .unwrap()
            .unwrap();
        assert_eq!(category.emoji, "🍜");
    }

    #[test]
    fn test_project_emoji_column_never_applied() {
        let (_temp_dir, store) = open_temp_store();
        let project = store.create_project("Trip", "✈️").unwrap();

        let csv = "category,project emoji,description,amount\nFood,🚀,Lunch,10\n";
        import_str(&store, csv, project.id).unwrap();

        assert_eq!(store.get_project(project.id).unwrap().emoji, "✈️");
    }

    #[test]
    fn test_import_into_missing_project_fails() {
        let (_temp_dir, store) = open_temp_store();
        let csv = "category,description,amount\nFood,Lunch,10\n";
        let err = import_str(&store, csv, ProjectId::new(404)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_export_import_round_trip() {
        let (_temp_dir, store) = open_temp_store();
        let source = store.create_project("Trip", "✈️").unwrap();
        let food = store.create_category(source.id, "Food", "🍔").unwrap();
        let travel = store.create_category(source.id, "Travel", "🚕").unwrap();

        let day = |d: u32| Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap();
        store
            .create_expense(
                NewExpense::new(food.id, 250.5, "tapas, \"extra\" spicy\nround two")
                    .with_date(day(15))
                    .with_payment_method("Cash"),
            )
            .unwrap();
        store
            .create_expense(NewExpense::new(travel.id, 40.0, "Taxi").with_date(day(10)))
            .unwrap();

        let mut csv = Vec::new();
        export_expenses_csv(&store, Some(source.id), &mut csv).unwrap();

        let fresh = store.create_project("Trip Again", "🧳").unwrap();
        let summary = ImportService::new(&store)
            .import(csv.as_slice(), fresh.id)
            .unwrap();
        assert_eq!(summary.imported, 2);

        let tuples = |project: ProjectId| {
            let mut rows: Vec<_> = store
                .list_categories(project)
                .unwrap()
                .into_iter()
                .flat_map(|c| store.list_expenses(c.id).unwrap())
                .map(|e| (e.description, e.amount.to_bits(), e.date, e.payment_method))
                .collect();
            rows.sort();
            rows
        };

        assert_eq!(tuples(source.id), tuples(fresh.id));
    }
}
