//! CSV Export functionality
//!
//! Selects expenses by category and date bounds and writes them to a separate
//! file in the same schema as the primary store.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, Expense};

/// Options for selecting expenses to export
///
/// Every filter that is set must match (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilter {
    /// Category, compared ignoring case
    pub category: Option<String>,
    /// Earliest date included
    pub start: Option<NaiveDate>,
    /// Latest date included
    pub end: Option<NaiveDate>,
}

impl ExportFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw user input; blank fields are ignored
    pub fn from_input(category: &str, start: &str, end: &str) -> ExpenseResult<Self> {
        let start = parse_bound(start, "start")?;
        let end = parse_bound(end, "end")?;
        let category = Some(category.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(Self {
            category,
            start,
            end,
        })
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by earliest date
    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Filter by latest date
    pub fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Check whether an expense passes every filter
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category
            .as_deref()
            .map_or(true, |c| expense.in_category(c))
            && expense.within(self.start, self.end)
    }

    /// Keep only the matching expenses, preserving order
    pub fn apply(&self, expenses: Vec<Expense>) -> Vec<Expense> {
        expenses.into_iter().filter(|e| self.matches(e)).collect()
    }
}

fn parse_bound(input: &str, which: &str) -> ExpenseResult<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    parse_date(input)
        .map(Some)
        .map_err(|e| ExpenseError::Validation(format!("Invalid {} date: {}", which, e)))
}

/// Result of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Where the expenses were written
    pub destination: PathBuf,
    /// The exported expenses, in stored order
    pub expenses: Vec<Expense>,
}

impl ExportOutcome {
    /// Number of exported expenses
    pub fn count(&self) -> usize {
        self.expenses.len()
    }

    /// Whether the file was written at all
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
