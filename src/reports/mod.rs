//! Reports module
//!
//! Aggregations over the expense set:
//! - Category Summary: totals per category, largest first
//! - Date Range Report: expenses between two dates with their total

pub mod category;
pub mod date_range;

pub use category::{CategorySummary, CategoryTotal};
pub use date_range::DateRangeReport;
