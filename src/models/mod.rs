//! Core data models for the expense tracker
//!
//! This module contains the expense record together with the value types and
//! validators it is built from: ids, money amounts and calendar dates.

pub mod date;
pub mod expense;
pub mod ids;
pub mod money;

pub use date::{format_date, parse_date, DateParseError, DATE_FORMAT};
pub use expense::{Expense, DEFAULT_CATEGORY};
pub use ids::{ExpenseId, SHORT_ID_LEN};
pub use money::{parse_amount, Money, MoneyParseError};
