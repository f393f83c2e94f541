//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and reports for the terminal.
//! Amounts are always shown with the configured currency symbol.

pub mod expense;
pub mod report;

pub use expense::{format_amount, format_expense_details, format_expense_list, format_expense_row};
pub use report::{format_category_summary, format_date_range_report, separator, truncate};
