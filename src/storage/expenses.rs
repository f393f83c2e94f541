//! Expense repository for CSV storage
//!
//! Manages loading and saving expenses to the configured CSV file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExpenseError;
use crate::models::Expense;

use super::file_io::{read_expenses_csv, write_expenses_atomic};
use super::ExpenseStore;

/// Store backed by a single CSV file
#[derive(Debug, Clone)]
pub struct CsvExpenseStore {
    path: PathBuf,
}

impl CsvExpenseStore {
    /// Create a store for the given file; nothing is touched until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the backing file holds at least a header row
    pub fn is_initialized(&self) -> bool {
        fs::metadata(&self.path)
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false)
    }
}

impl ExpenseStore for CsvExpenseStore {
    fn ensure_initialized(&self) -> Result<(), ExpenseError> {
        if self.is_initialized() {
            return Ok(());
        }
        write_expenses_atomic(&self.path, &[])
    }

    fn load_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        self.ensure_initialized()?;

        let expenses = read_expenses_csv(&self.path)?;

        let mut seen = HashSet::with_capacity(expenses.len());
        for expense in &expenses {
            if !seen.insert(expense.id) {
                return Err(ExpenseError::Storage(format!(
                    "Duplicate expense id {} in {}",
                    expense.id,
                    self.path.display()
                )));
            }
        }

        Ok(expenses)
    }

    fn save_all(&self, expenses: &[Expense]) -> Result<(), ExpenseError> {
        write_expenses_atomic(&self.path, expenses)
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_amount, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, CsvExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvExpenseStore::new(temp_dir.path().join("expenses.csv"));
        (temp_dir, store)
    }

    fn expense(date: &str, category: &str, amount: &str) -> Expense {
        Expense::new(
            crate::models::parse_date(date).unwrap(),
            category,
            parse_amount(amount).unwrap(),
            "",
        )
    }

    #[test]
    fn test_ensure_initialized_creates_header() {
        let (_temp_dir, store) = create_test_store();
        assert!(!store.is_initialized());

        store.ensure_initialized().unwrap();

        assert!(store.is_initialized());
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "id,date,category,amount,description\r\n"
        );
    }

    #[test]
    fn test_ensure_initialized_is_idempotent() {
        let (_temp_dir, store) = create_test_store();
        store.save_all(&[expense("2024-01-01", "food", "5")]).unwrap();
        let before = fs::read(store.path()).unwrap();

        store.ensure_initialized().unwrap();

        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_empty_file_gets_header() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.path(), "").unwrap();

        assert!(store.load_all().unwrap().is_empty());
        assert!(store.is_initialized());
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, store) = create_test_store();
        assert!(store.load_all().unwrap().is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_and_reload_preserves_order() {
        let (_temp_dir, store) = create_test_store();
        let expenses = vec![
            expense("2024-03-01", "rent", "900"),
            expense("2024-01-01", "food", "5.5"),
            expense("2024-02-01", "travel", "-20"),
        ];

        store.save_all(&expenses).unwrap();
        let loaded = store.load_all().unwrap();

        assert_eq!(loaded, expenses);
        assert_eq!(loaded[1].amount, Money::from_cents(550));
    }

    #[test]
    fn test_save_of_load_is_byte_identical() {
        let (_temp_dir, store) = create_test_store();
        let mut tricky = expense("2024-01-02", "gifts, misc", "12.30");
        tricky.description = "said \"thanks\"".into();
        store
            .save_all(&[expense("2024-01-01", "food", "1"), tricky])
            .unwrap();
        let before = fs::read(store.path()).unwrap();

        let loaded = store.load_all().unwrap();
        store.save_all(&loaded).unwrap();

        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let (_temp_dir, store) = create_test_store();
        let e = expense("2024-01-01", "food", "1");
        store.save_all(&[e.clone(), e]).unwrap();

        let err = store.load_all().unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_unreadable_path_is_storage_error() {
        let (temp_dir, _) = create_test_store();
        // A directory where the file should be
        let store = CsvExpenseStore::new(temp_dir.path());
        assert!(store.load_all().unwrap_err().is_storage());
    }

    #[test]
    fn test_dates_are_stored_canonically() {
        let (_temp_dir, store) = create_test_store();
        store.save_all(&[expense("2024-01-05", "food", "1")]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(",2024-01-05,food,1.00,\r\n"));
        assert_eq!(
            store.load_all().unwrap()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }
}
