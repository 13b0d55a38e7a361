//! CSV export
//!
//! Flattens expenses (optionally for one project) into the fixed
//! eight-column CSV layout. Row order mirrors the underlying store query —
//! project name, category name, expense date — rather than re-sorting here.

use std::io::Write;

use super::{escape_csv, DATE_FORMAT_LONG, EXPORT_HEADER};
use crate::error::SpendbookResult;
use crate::models::ProjectId;
use crate::storage::Store;

/// Export expenses to CSV; `project` limits output to one project,
/// `None` exports everything
pub fn export_expenses_csv<W: Write>(
    store: &Store,
    project: Option<ProjectId>,
    writer: &mut W,
) -> SpendbookResult<()> {
    writeln!(writer, "{EXPORT_HEADER}")?;

    for row in store.expense_rows(project)? {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{}",
            escape_csv(&row.project_name),
            escape_csv(&row.project_emoji),
            escape_csv(&row.category_name),
            escape_csv(&row.category_emoji),
            escape_csv(&row.description),
            row.amount,
            row.date.format(DATE_FORMAT_LONG),
            escape_csv(row.payment_method.as_deref().unwrap_or("")),
        )?;
    }

    Ok(())
}
