//! Date Range Report
//!
//! Lists the expenses between two dates (inclusive) with their total.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

/// Expenses within a date range, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeReport {
    /// First day included
    pub start: NaiveDate,
    /// Last day included
    pub end: NaiveDate,
    /// Matching expenses sorted by date ascending
    pub expenses: Vec<Expense>,
    /// Sum of the matching amounts
    pub total: Money,
}

impl DateRangeReport {
    /// Build the report, or `None` when nothing falls within the range
    ///
    /// Fails with a range error when `start` is after `end`, or when the
    /// total overflows.
    pub fn from_expenses(
        expenses: &[Expense],
        start: NaiveDate,
        end: NaiveDate,
    ) -> ExpenseResult<Option<Self>> {
        if start > end {
            return Err(ExpenseError::Range { start, end });
        }

        let mut matching: Vec<Expense> = expenses
            .iter()
            .filter(|e| e.within(Some(start), Some(end)))
            .cloned()
            .collect();

        if matching.is_empty() {
            return Ok(None);
        }

        matching.sort_by_key(|e| e.date);

        let total = Money::checked_sum(matching.iter().map(|e| e.amount))
            .ok_or_else(|| ExpenseError::total_overflow(format!("{} to {}", start, end)))?;

        Ok(Some(Self {
            start,
            end,
            expenses: matching,
            total,
        }))
    }
}
