//! Expense model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ExpenseId};

/// A single recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent; non-negative by convention, not enforced
    pub amount: f64,

    /// When the expense occurred
    pub date: DateTime<Utc>,

    /// Free-text description
    pub description: String,

    /// The category this expense belongs to
    pub category_id: CategoryId,

    /// Optional payment-method label ("Cash", "Visa ...")
    pub payment_method: Option<String>,

    /// Optional icon key for the payment method
    pub payment_icon: Option<String>,
}

/// Fields needed to create a new expense; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub category_id: CategoryId,
    pub payment_method: Option<String>,
    pub payment_icon: Option<String>,
}

impl NewExpense {
    /// Create a minimal expense input dated now
    pub fn new(category_id: CategoryId, amount: f64, description: impl Into<String>) -> Self {
        Self {
            amount,
            date: Utc::now(),
            description: description.into(),
            category_id,
            payment_method: None,
            payment_icon: None,
        }
    }

    /// Set the expense date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Set the payment-method label
    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense_builder() {
        let input = NewExpense::new(CategoryId::new(1), 250.5, "Lunch")
            .with_payment_method("Cash");

        assert_eq!(input.amount, 250.5);
        assert_eq!(input.description, "Lunch");
        assert_eq!(input.payment_method.as_deref(), Some("Cash"));
        assert!(input.payment_icon.is_none());
    }
}
