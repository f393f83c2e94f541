//! CSV file I/O with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure. Every
//! expense file, primary store or export, shares the same five-column schema.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::{format_date, parse_amount, parse_date, Expense, ExpenseId};

/// Column names, in file order
pub const CSV_FIELDS: [&str; 5] = ["id", "date", "category", "amount", "description"];

/// One row of an expense file, exactly as it appears on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ExpenseRow {
    id: String,
    date: String,
    category: String,
    amount: String,
    description: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            date: format_date(expense.date),
            category: expense.category.clone(),
            amount: expense.amount.to_string(),
            description: expense.description.clone(),
        }
    }
}

impl ExpenseRow {
    fn into_expense(self) -> Result<Expense, String> {
        let id = ExpenseId::parse(&self.id).map_err(|_| format!("invalid id '{}'", self.id))?;
        let date = parse_date(&self.date).map_err(|e| e.to_string())?;
        let amount = parse_amount(&self.amount).map_err(|e| e.to_string())?;

        Ok(Expense {
            id,
            date,
            category: self.category,
            amount,
            description: self.description,
        })
    }
}

/// Read every expense from a CSV file, in file order
///
/// The file must exist and start with the exact header row.
pub fn read_expenses_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Expense>, ExpenseError> {
    let path = path.as_ref();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let headers = reader
        .headers()
        .map_err(|e| ExpenseError::Storage(format!("Failed to read {}: {}", path.display(), e)))?
        .clone();

    if !headers.iter().eq(CSV_FIELDS.iter().copied()) {
        return Err(ExpenseError::Storage(format!(
            "Unexpected header in {}: expected '{}', found '{}'",
            path.display(),
            CSV_FIELDS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut expenses = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            ExpenseError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let row: ExpenseRow = record.deserialize(Some(&headers)).map_err(|e| {
            ExpenseError::Storage(format!("{} line {}: {}", path.display(), line, e))
        })?;

        let expense = row.into_expense().map_err(|e| {
            ExpenseError::Storage(format!("{} line {}: {}", path.display(), line, e))
        })?;

        expenses.push(expense);
    }

    Ok(expenses)
}

/// Write the header and every expense as CSV to any writer
pub fn write_expenses<W: Write>(writer: W, expenses: &[Expense]) -> Result<(), ExpenseError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer
        .write_record(CSV_FIELDS)
        .map_err(|e| ExpenseError::Storage(format!("Failed to write header: {}", e)))?;

    for expense in expenses {
        csv_writer
            .serialize(ExpenseRow::from(expense))
            .map_err(|e| ExpenseError::Storage(format!("Failed to write expense: {}", e)))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;

    Ok(())
}

/// Write expenses to a CSV file atomically (write to temp, then rename)
///
/// The file is either completely replaced or left untouched, even if the
/// process dies halfway through the write.
pub fn write_expenses_atomic<P: AsRef<Path>>(
    path: P,
    expenses: &[Expense],
) -> Result<(), ExpenseError> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file lives in the same directory so the rename stays atomic
    let temp_path = temp_path_for(path)?;

    let file = File::create(&temp_path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    if let Err(e) = write_expenses(&mut writer, expenses) {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    let file = writer
        .into_inner()
        .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;

    file.sync_all()
        .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ExpenseError::Storage(format!(
            "Failed to replace {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Whether two paths name the same file
///
/// Paths that cannot be resolved (for instance because they do not exist
/// yet) only match when they are written identically.
pub fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn temp_path_for(path: &Path) -> Result<PathBuf, ExpenseError> {
    let mut name = path
        .file_name()
        .ok_or_else(|| {
            ExpenseError::Storage(format!("Not a file path: {}", path.display()))
        })?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}
