//! Tabular interchange engine
//!
//! Per-project CSV export/import, distinct from the full-state snapshot.
//! Export emits a fixed eight-column layout; import tolerates hand-edited
//! and legacy files through alias-based header resolution.

pub mod export;
pub mod import;

pub use export::export_expenses_csv;
pub use import::{ImportService, ImportSummary};

/// Fixed export column order
pub const EXPORT_HEADER: &str =
    "Project,Project Emoji,Category,Category Emoji,Description,Amount,Date,Payment Method";

/// Day/month/four-digit-year, the format export writes
pub(crate) const DATE_FORMAT_LONG: &str = "%d/%m/%Y";

/// Day/month/two-digit-year, tried first by import
pub(crate) const DATE_FORMAT_SHORT: &str = "%d/%m/%y";

/// Escape a field for CSV output: quoted iff it contains a comma, a double
/// quote, or a line break (either kind); internal quotes doubled
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
