//! Strict calendar date parsing
//!
//! Expense dates are always stored as `YYYY-MM-DD`. chrono alone accepts
//! unpadded fields such as `2024-2-5`, so the shape is checked before parsing.

use chrono::NaiveDate;
use std::fmt;

/// The canonical textual date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date that must be exactly `YYYY-MM-DD` and name a real day
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    if !has_canonical_shape(s) {
        return Err(DateParseError::InvalidFormat(s.to_string()));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| DateParseError::NoSuchDate(s.to_string()))
}

/// Format a date in the canonical form
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn has_canonical_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Error type for date parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Input is not shaped like `YYYY-MM-DD`
    InvalidFormat(String),
    /// Input is well-formed but names no calendar day (e.g. February 30th)
    NoSuchDate(String),
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateParseError::InvalidFormat(s) => {
                write!(f, "Invalid date format: '{}'. Use YYYY-MM-DD", s)
            }
            DateParseError::NoSuchDate(s) => write!(f, "No such date: '{}'", s),
        }
    }
}

impl std::error::Error for DateParseError {}
