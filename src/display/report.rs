//! Report formatting utilities for terminal output
//!
//! Renders the category and date range summaries.

use crate::reports::{CategorySummary, DateRangeReport};

use super::expense::{format_expense_list, CATEGORY_WIDTH};

/// Format the per-category totals
pub fn format_category_summary(summary: &CategorySummary, symbol: &str) -> String {
    let mut output = String::from("Total by category:\n");

    for row in &summary.rows {
        output.push_str(&format!(
            "{:width$} : {}{}\n",
            row.category,
            symbol,
            row.total,
            width = CATEGORY_WIDTH
        ));
    }

    output
}

/// Format a date range report: the matching rows, then their total
pub fn format_date_range_report(report: &DateRangeReport, symbol: &str) -> String {
    let mut output = format!("Expenses from {} to {}:\n", report.start, report.end);
    output.push_str(&format_expense_list(&report.expenses, symbol));
    output.push('\n');
    output.push_str(&format!("Total: {}{}\n", symbol, report.total));
    output
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Cut a string to at most `width` characters and pad it to exactly `width`
pub fn fit(s: &str, width: usize) -> String {
    let cut: String = s.chars().take(width).collect();
    format!("{:width$}", cut, width = width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
