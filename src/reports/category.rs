//! Category Summary
//!
//! Totals spending per category across the whole store.

use std::collections::HashMap;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

/// Total for a single category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category label, exactly as stored
    pub category: String,
    /// Sum of the category's amounts
    pub total: Money,
    /// Number of expenses in the category
    pub count: usize,
}

/// Per-category totals, largest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    /// One row per category, ordered by total descending
    pub rows: Vec<CategoryTotal>,
    /// Sum over every expense
    pub total: Money,
}

impl CategorySummary {
    /// Build the summary from a full expense set
    ///
    /// Categories with equal totals keep the order in which they first
    /// appear in `expenses`. Fails if any total overflows.
    pub fn from_expenses(expenses: &[Expense]) -> ExpenseResult<Self> {
        let mut rows: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for expense in expenses {
            let i = *index.entry(expense.category.as_str()).or_insert_with(|| {
                rows.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: Money::zero(),
                    count: 0,
                });
                rows.len() - 1
            });
            let row = &mut rows[i];
            row.total = row
                .total
                .checked_add(expense.amount)
                .ok_or_else(|| ExpenseError::total_overflow(format!("category {}", row.category)))?;
            row.count += 1;
        }

        let total = Money::checked_sum(rows.iter().map(|r| r.total))
            .ok_or_else(|| ExpenseError::total_overflow("all categories"))?;

        rows.sort_by(|a, b| b.total.cmp(&a.total));

        Ok(Self { rows, total })
    }

    /// Whether there is nothing to summarize
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
