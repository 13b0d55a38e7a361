//! Expense CRUD and the flattened interchange query

use rusqlite::params;

use super::Store;
use crate::error::SpendbookResult;
use crate::models::{CategoryId, Expense, ExpenseId, NewExpense, ProjectId};
use chrono::{DateTime, Utc};

/// One flattened expense row as the exporter emits it, joined with its
/// category and project. Ordering comes from the query: project name, then
/// category name, then expense date, ascending.
#[derive(Debug, Clone)]
pub struct ExpenseRow {
    pub project_name: String,
    pub project_emoji: String,
    pub category_name: String,
    pub category_emoji: String,
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub payment_method: Option<String>,
}

impl Store {
    /// Create a new expense; the owning project's last-modified instant is
    /// bumped as a side effect
    pub fn create_expense(&self, input: NewExpense) -> SpendbookResult<Expense> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (amount, date, description, category_id, payment_method, payment_icon)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.amount,
                input.date,
                input.description,
                input.category_id,
                input.payment_method,
                input.payment_icon,
            ],
        )?;
        let id = ExpenseId::new(conn.last_insert_rowid());

        conn.execute(
            "UPDATE projects SET updated_at = ?1
             WHERE id = (SELECT project_id FROM categories WHERE id = ?2)",
            params![Utc::now(), input.category_id],
        )?;

        Ok(Expense {
            id,
            amount: input.amount,
            date: input.date,
            description: input.description,
            category_id: input.category_id,
            payment_method: input.payment_method,
            payment_icon: input.payment_icon,
        })
    }

    /// List a category's expenses, oldest first
    pub fn list_expenses(&self, category_id: CategoryId) -> SpendbookResult<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, amount, date, description, category_id, payment_method, payment_icon
             FROM expenses WHERE category_id = ?1 ORDER BY date",
        )?;
        let expenses = stmt
            .query_map(params![category_id], expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// Delete an expense; its assets cascade
    pub fn delete_expense(&self, id: ExpenseId) -> SpendbookResult<()> {
        self.conn()?
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Flattened expense rows for tabular export, optionally limited to one
    /// project. Ordered by project name, category name, then expense date.
    pub fn expense_rows(&self, project: Option<ProjectId>) -> SpendbookResult<Vec<ExpenseRow>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT p.name, p.emoji, c.name, c.emoji,
                    e.description, e.amount, e.date, e.payment_method
             FROM expenses e
             JOIN categories c ON c.id = e.category_id
             JOIN projects p ON p.id = c.project_id
             {}
             ORDER BY p.name, c.name, e.date",
            if project.is_some() {
                "WHERE p.id = ?1"
            } else {
                ""
            }
        );

        let mut stmt = conn.prepare(&sql)?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<ExpenseRow> {
            Ok(ExpenseRow {
                project_name: row.get(0)?,
                project_emoji: row.get(1)?,
                category_name: row.get(2)?,
                category_emoji: row.get(3)?,
                description: row.get(4)?,
                amount: row.get(5)?,
                date: row.get(6)?,
                payment_method: row.get(7)?,
            })
        };

        let rows = match project {
            Some(id) => stmt
                .query_map(params![id], map_row)?
                .collect::<Result<Vec<_>, _>>()?,
            None => stmt
                .query_map([], map_row)?
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(rows)
    }
}

fn expense_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        category_id: row.get(4)?,
        payment_method: row.get(5)?,
        payment_icon: row.get(6)?,
    })
}
