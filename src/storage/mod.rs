//! Storage layer for the expense tracker
//!
//! The whole record set is the unit of persistence: every operation loads all
//! expenses, works on them in memory and writes the complete set back.
//! `ExpenseStore` hides how that happens from the service layer.

pub mod expenses;
pub mod file_io;

pub use expenses::CsvExpenseStore;
pub use file_io::{
    read_expenses_csv, same_file, write_expenses, write_expenses_atomic, CSV_FIELDS,
};

use std::path::Path;

use crate::error::ExpenseError;
use crate::models::Expense;

/// Persistence of the complete expense set
pub trait ExpenseStore {
    /// Create an empty store if none exists yet; no-op otherwise
    fn ensure_initialized(&self) -> Result<(), ExpenseError>;

    /// Every persisted expense, in stored order
    fn load_all(&self) -> Result<Vec<Expense>, ExpenseError>;

    /// Replace the stored set with exactly `expenses`
    fn save_all(&self, expenses: &[Expense]) -> Result<(), ExpenseError>;

    /// The file backing this store, if it lives on disk
    fn location(&self) -> Option<&Path> {
        None
    }
}
