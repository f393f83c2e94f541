//! Expense model
//!
//! The single record type kept by the tracker: when money was spent, on what
//! category, how much and why.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::Money;

/// Category assigned when the user leaves it blank
pub const DEFAULT_CATEGORY: &str = "misc";

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Day the money was spent
    pub date: NaiveDate,

    /// Free-text category label
    pub category: String,

    /// Amount, always with two decimal places
    pub amount: Money,

    /// Short description, may be empty
    #[serde(default)]
    pub description: String,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            date,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    /// Whether this expense's category equals `category`, ignoring case
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Whether this expense falls inside the inclusive range
    pub fn within(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        start.map_or(true, |s| self.date >= s) && end.map_or(true, |e| self.date <= e)
    }
}
