//! Expense service
//!
//! Provides the operations behind every menu entry and subcommand: adding,
//! listing, editing, deleting, summarizing and exporting expenses. Input
//! arrives as raw text and is trimmed and validated here, before anything is
//! loaded or written.

use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::audit::{generate_diff, AuditEntry, AuditLogger};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{ExportFilter, ExportOutcome};
use crate::models::{parse_amount, parse_date, Expense, Money, DEFAULT_CATEGORY};
use crate::reports::{CategorySummary, DateRangeReport};
use crate::storage::{same_file, write_expenses_atomic, ExpenseStore};

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a dyn ExpenseStore,
    audit: Option<&'a AuditLogger>,
    default_category: String,
}

/// Input for creating a new expense, as typed by the user
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    /// Blank means today
    pub date: String,
    /// Blank means the default category
    pub category: String,
    pub amount: String,
    pub description: String,
}

/// Changes to apply to an existing expense
///
/// A field that is `None` or blank keeps its current value.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
}

/// Result of an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The record as it was before the edit
    pub before: Expense,
    /// The record as saved
    pub expense: Expense,
    /// How many records the prefix matched; only the first was edited
    pub match_count: usize,
}

impl EditOutcome {
    /// Whether the prefix matched more than one record
    pub fn is_ambiguous(&self) -> bool {
        self.match_count > 1
    }
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The prefix matched nothing
    NothingToDelete,
    /// Matches were found but the deletion was not confirmed
    AwaitingConfirmation(Vec<Expense>),
    /// The listed records were removed
    Deleted(Vec<Expense>),
}

impl DeleteOutcome {
    /// Number of records removed
    pub fn deleted_count(&self) -> usize {
        match self {
            DeleteOutcome::Deleted(removed) => removed.len(),
            _ => 0,
        }
    }

    /// The records matched by the prefix
    pub fn matches(&self) -> &[Expense] {
        match self {
            DeleteOutcome::NothingToDelete => &[],
            DeleteOutcome::AwaitingConfirmation(m) | DeleteOutcome::Deleted(m) => m,
        }
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a dyn ExpenseStore) -> Self {
        Self {
            store,
            audit: None,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Record every change in the given audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Category used when an expense is added without one
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Add a new expense
    pub fn add(&self, input: NewExpense) -> ExpenseResult<Expense> {
        let date = match input.date.trim() {
            "" => Local::now().date_naive(),
            text => validate_date(text)?,
        };
        let category = match input.category.trim() {
            "" => self.default_category.clone(),
            text => text.to_string(),
        };
        let amount = validate_amount(&input.amount)?;

        let mut expenses = self.store.load_all()?;

        let mut expense = Expense::new(date, category, amount, input.description.trim());
        while expenses.iter().any(|e| e.id == expense.id) {
            expense.id = Default::default();
        }

        self.log(&[AuditEntry::create(&expense)])?;

        expenses.push(expense.clone());
        self.store.save_all(&expenses)?;

        Ok(expense)
    }

    /// Every expense, newest first
    ///
    /// Expenses on the same date keep their stored order.
    pub fn list_all(&self) -> ExpenseResult<Vec<Expense>> {
        let mut expenses = self.store.load_all()?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    /// The `limit` newest expenses
    pub fn list_recent(&self, limit: usize) -> ExpenseResult<Vec<Expense>> {
        let mut expenses = self.list_all()?;
        expenses.truncate(limit);
        Ok(expenses)
    }

    /// Every expense whose id starts with `prefix`, in stored order
    pub fn find_by_id_prefix(&self, prefix: &str) -> ExpenseResult<Vec<Expense>> {
        let prefix = prefix.trim();
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .filter(|e| e.id.starts_with(prefix))
            .collect())
    }

    /// Edit the first expense whose id starts with `prefix`
    pub fn edit(&self, prefix: &str, update: ExpenseUpdate) -> ExpenseResult<EditOutcome> {
        let prefix = require_prefix(prefix)?;

        let date = supplied(&update.date).map(validate_date).transpose()?;
        let amount = supplied(&update.amount).map(validate_amount).transpose()?;

        let mut expenses = self.store.load_all()?;

        let match_count = expenses.iter().filter(|e| e.id.starts_with(prefix)).count();
        let target = expenses
            .iter_mut()
            .find(|e| e.id.starts_with(prefix))
            .ok_or_else(|| ExpenseError::expense_not_found(prefix))?;

        let before = target.clone();
        if let Some(date) = date {
            target.date = date;
        }
        if let Some(category) = supplied(&update.category) {
            target.category = category.to_string();
        }
        if let Some(amount) = amount {
            target.amount = amount;
        }
        if let Some(description) = supplied(&update.description) {
            target.description = description.to_string();
        }
        let expense = target.clone();

        let diff = generate_diff(
            &serde_json::to_value(&before)?,
            &serde_json::to_value(&expense)?,
        );
        self.log(&[AuditEntry::update(&before, &expense, diff)])?;

        self.store.save_all(&expenses)?;

        Ok(EditOutcome {
            before,
            expense,
            match_count,
        })
    }

    /// Delete every expense whose id starts with `prefix`
    ///
    /// Nothing is removed unless `confirmed` is set.
    pub fn delete(&self, prefix: &str, confirmed: bool) -> ExpenseResult<DeleteOutcome> {
        let prefix = require_prefix(prefix)?;

        let expenses = self.store.load_all()?;
        let (removed, kept): (Vec<Expense>, Vec<Expense>) =
            expenses.into_iter().partition(|e| e.id.starts_with(prefix));

        if removed.is_empty() {
            return Ok(DeleteOutcome::NothingToDelete);
        }
        if !confirmed {
            return Ok(DeleteOutcome::AwaitingConfirmation(removed));
        }

        let entries: Vec<AuditEntry> = removed.iter().map(AuditEntry::delete).collect();
        self.log(&entries)?;

        self.store.save_all(&kept)?;

        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Totals per category, largest first
    pub fn summary_by_category(&self) -> ExpenseResult<CategorySummary> {
        CategorySummary::from_expenses(&self.store.load_all()?)
    }

    /// Expenses between two dates (inclusive), or `None` when there are none
    pub fn summary_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ExpenseResult<Option<DateRangeReport>> {
        if start > end {
            return Err(ExpenseError::Range { start, end });
        }
        DateRangeReport::from_expenses(&self.store.load_all()?, start, end)
    }

    /// Write the expenses matching `filter` to `destination`
    ///
    /// When nothing matches no file is written.
    pub fn export_filtered(
        &self,
        filter: &ExportFilter,
        destination: &Path,
    ) -> ExpenseResult<ExportOutcome> {
        if self
            .store
            .location()
            .is_some_and(|store| same_file(store, destination))
        {
            return Err(ExpenseError::Validation(format!(
                "Cannot export over the expenses file {}",
                destination.display()
            )));
        }

        let matching = filter.apply(self.store.load_all()?);

        if !matching.is_empty() {
            self.log(&[AuditEntry::export(
                destination.display().to_string(),
                matching.len(),
            )])?;
            write_expenses_atomic(destination, &matching)?;
        }

        Ok(ExportOutcome {
            destination: destination.to_path_buf(),
            expenses: matching,
        })
    }

    /// Sum of every stored amount
    pub fn total(&self) -> ExpenseResult<Money> {
        Money::checked_sum(self.store.load_all()?.iter().map(|e| e.amount))
            .ok_or_else(|| ExpenseError::total_overflow("all expenses"))
    }

    /// Append to the audit log, if any
    ///
    /// Called before the change is written, so a change that cannot be
    /// audited is not made.
    fn log(&self, entries: &[AuditEntry]) -> ExpenseResult<()> {
        match self.audit {
            Some(audit) => audit.log_batch(entries),
            None => Ok(()),
        }
    }
}

/// Parse a user-entered date, as a validation error
pub fn validate_date(input: &str) -> ExpenseResult<NaiveDate> {
    parse_date(input.trim()).map_err(|e| ExpenseError::Validation(e.to_string()))
}

/// Parse a user-entered amount, as a validation error
pub fn validate_amount(input: &str) -> ExpenseResult<Money> {
    parse_amount(input).map_err(|e| ExpenseError::Validation(e.to_string()))
}

fn require_prefix(prefix: &str) -> ExpenseResult<&str> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(ExpenseError::Validation("Expense ID is required".into()));
    }
    Ok(prefix)
}

fn supplied(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::fs;

    use tempfile::TempDir;

    use crate::audit::Operation;
    use crate::storage::CsvExpenseStore;

    fn create_test_store() -> (TempDir, CsvExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvExpenseStore::new(temp_dir.path().join("expenses.csv"));
        (temp_dir, store)
    }

    /// In-memory store counting how often it is touched
    #[derive(Default)]
    struct MemoryStore {
        expenses: RefCell<Vec<Expense>>,
        loads: Cell<usize>,
        saves: Cell<usize>,
    }

    impl ExpenseStore for MemoryStore {
        fn ensure_initialized(&self) -> ExpenseResult<()> {
            Ok(())
        }

        fn load_all(&self) -> ExpenseResult<Vec<Expense>> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.expenses.borrow().clone())
        }

        fn save_all(&self, expenses: &[Expense]) -> ExpenseResult<()> {
            self.saves.set(self.saves.get() + 1);
            *self.expenses.borrow_mut() = expenses.to_vec();
            Ok(())
        }
    }

    fn new_expense(date: &str, category: &str, amount: &str) -> NewExpense {
        NewExpense {
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
            description: String::new(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_add_rounds_and_persists() {
        let (_temp_dir, store) = create_test_store();
        let service = ExpenseService::new(&store);

        let expense = service
            .add(NewExpense {
                date: "2024-01-01".into(),
                category: "food".into(),
                amount: "9.999".into(),
                description: "lunch".into(),
            })
            .unwrap();

        assert_eq!(expense.amount, Money::from_cents(1000));
        let stored = store.load_all().unwrap();
        assert_eq!(stored, vec![expense]);
        assert_eq!(stored[0].amount.to_string(), "10.00");
    }

    #[test]
    fn test_add_defaults() {
        let (_temp_dir, store) = create_test_store();
        let service = ExpenseService::new(&store);

        let expense = service.add(new_expense("  ", " ", " 5 ")).unwrap();

        assert_eq!(expense.date, Local::now().date_naive());
        assert_eq!(expense.category, "misc");
        assert_eq!(expense.amount, Money::from_cents(500));
    }

    #[test]
    fn test_add_custom_default_category() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store).with_default_category("other");

        let expense = service.add(new_expense("2024-01-01", "", "1")).unwrap();
        assert_eq!(expense.category, "other");
    }

    #[test]
    fn test_add_trims_fields() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);

        let expense = service
            .add(NewExpense {
                date: " 2024-01-01 ".into(),
                category: " food ".into(),
                amount: "1".into(),
                description: "  lunch  ".into(),
            })
            .unwrap();

        assert_eq!(expense.category, "food");
        assert_eq!(expense.description, "lunch");
    }

    #[test]
    fn test_add_validation_touches_nothing() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);

        assert!(service
            .add(new_expense("2024-02-30", "food", "1"))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add(new_expense("2024-01-01", "food", "abc"))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add(new_expense("2024-01-01", "food", ""))
            .unwrap_err()
            .is_validation());

        assert_eq!(store.loads.get(), 0);
        assert_eq!(store.saves.get(), 0);
    }

    #[test]
    fn test_list_sorted_newest_first_stable() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        let a = service.add(new_expense("2024-01-01", "a", "1")).unwrap();
        let b = service.add(new_expense("2024-03-01", "b", "1")).unwrap();
        let c = service.add(new_expense("2024-01-01", "c", "1")).unwrap();

        assert_eq!(service.list_all().unwrap(), vec![b.clone(), a.clone(), c]);
        assert_eq!(service.list_recent(2).unwrap(), vec![b, a]);
        assert_eq!(service.list_recent(10).unwrap().len(), 3);
    }

    #[test]
    fn test_find_by_id_prefix() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        let a = service.add(new_expense("2024-01-01", "a", "1")).unwrap();
        service.add(new_expense("2024-01-02", "b", "1")).unwrap();

        assert_eq!(service.find_by_id_prefix(&a.id.to_string()).unwrap(), vec![a.clone()]);
        assert_eq!(service.find_by_id_prefix(&a.id.short()).unwrap()[0], a);
        assert_eq!(service.find_by_id_prefix("").unwrap().len(), 2);
        assert!(service.find_by_id_prefix("zzzzzzzz").unwrap().is_empty());
    }

    #[test]
    fn test_edit_keeps_blank_fields() {
        let (_temp_dir, store) = create_test_store();
        let service = ExpenseService::new(&store);
        let original = service
            .add(NewExpense {
                date: "2024-01-01".into(),
                category: "food".into(),
                amount: "5".into(),
                description: "lunch".into(),
            })
            .unwrap();

        let outcome = service
            .edit(
                &original.id.short(),
                ExpenseUpdate {
                    date: Some("".into()),
                    category: Some("groceries".into()),
                    amount: Some("7.125".into()),
                    description: None,
                },
            )
            .unwrap();

        assert_eq!(outcome.before, original);
        assert_eq!(outcome.match_count, 1);
        assert!(!outcome.is_ambiguous());
        assert_eq!(outcome.expense.id, original.id);
        assert_eq!(outcome.expense.date, original.date);
        assert_eq!(outcome.expense.category, "groceries");
        assert_eq!(outcome.expense.amount, Money::from_cents(712));
        assert_eq!(outcome.expense.description, "lunch");
        assert_eq!(store.load_all().unwrap(), vec![outcome.expense]);
    }

    #[test]
    fn test_edit_updates_in_place() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        let a = service.add(new_expense("2024-01-01", "a", "1")).unwrap();
        let b = service.add(new_expense("2024-01-02", "b", "1")).unwrap();
        let c = service.add(new_expense("2024-01-03", "c", "1")).unwrap();

        let update = ExpenseUpdate {
            description: Some("changed".into()),
            ..Default::default()
        };
        service.edit(&b.id.to_string(), update).unwrap();

        let stored = store.load_all().unwrap();
        assert_eq!(stored[0], a);
        assert_eq!(stored[1].id, b.id);
        assert_eq!(stored[1].description, "changed");
        assert_eq!(stored[2], c);
    }

    #[test]
    fn test_edit_reports_match_count() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        let mut a = Expense::new(date("2024-01-01"), "a", Money::zero(), "");
        let mut b = Expense::new(date("2024-01-02"), "b", Money::zero(), "");
        a.id = "abcdef00-0000-4000-8000-000000000001".parse().unwrap();
        b.id = "abcdef00-0000-4000-8000-000000000002".parse().unwrap();
        store.save_all(&[a.clone(), b.clone()]).unwrap();

        let update = ExpenseUpdate {
            category: Some("edited".into()),
            ..Default::default()
        };
        let outcome = service.edit("abcdef00", update).unwrap();

        assert_eq!(outcome.match_count, 2);
        assert!(outcome.is_ambiguous());
        assert_eq!(outcome.expense.id, a.id);
        assert_eq!(store.load_all().unwrap()[1], b);
    }

    #[test]
    fn test_edit_errors() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        let a = service.add(new_expense("2024-01-01", "a", "1")).unwrap();
        let saves = store.saves.get();

        let err = service.edit("zzzzzzzz", ExpenseUpdate::default()).unwrap_err();
        assert!(err.is_not_found());

        let err = service.edit("   ", ExpenseUpdate::default()).unwrap_err();
        assert!(err.is_validation());

        let bad_date = ExpenseUpdate {
            date: Some("2024/01/01".into()),
            ..Default::default()
        };
        assert!(service.edit(&a.id.short(), bad_date).unwrap_err().is_validation());

        let bad_amount = ExpenseUpdate {
            amount: Some("1.2.3".into()),
            ..Default::default()
        };
        assert!(service.edit(&a.id.short(), bad_amount).unwrap_err().is_validation());

        assert_eq!(store.saves.get(), saves);
        assert_eq!(store.load_all().unwrap(), vec![a]);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        let a = service.add(new_expense("2024-01-01", "a", "1")).unwrap();
        let saves = store.saves.get();

        let outcome = service.delete(&a.id.short(), false).unwrap();
        assert_eq!(outcome, DeleteOutcome::AwaitingConfirmation(vec![a.clone()]));
        assert_eq!(outcome.deleted_count(), 0);
        assert_eq!(outcome.matches(), &[a.clone()]);
        assert_eq!(store.saves.get(), saves);

        let outcome = service.delete(&a.id.short(), true).unwrap();
        assert_eq!(outcome.deleted_count(), 1);
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_every_match() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        let mut a = Expense::new(date("2024-01-01"), "a", Money::zero(), "");
        let mut b = Expense::new(date("2024-01-02"), "b", Money::zero(), "");
        let c = Expense::new(date("2024-01-03"), "c", Money::zero(), "");
        a.id = "abcdef00-0000-4000-8000-000000000001".parse().unwrap();
        b.id = "abcdef00-0000-4000-8000-000000000002".parse().unwrap();
        store.save_all(&[a, b, c.clone()]).unwrap();

        let outcome = service.delete("abcdef", true).unwrap();

        assert_eq!(outcome.deleted_count(), 2);
        assert_eq!(store.load_all().unwrap(), vec![c]);
    }

    #[test]
    fn test_delete_no_match_leaves_file_unchanged() {
        let (_temp_dir, store) = create_test_store();
        let service = ExpenseService::new(&store);
        service.add(new_expense("2024-01-01", "a", "1")).unwrap();
        let before = fs::read(store.path()).unwrap();

        let outcome = service.delete("zzzzzzzz", true).unwrap();

        assert_eq!(outcome, DeleteOutcome::NothingToDelete);
        assert_eq!(outcome.deleted_count(), 0);
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_delete_blank_prefix_rejected() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        service.add(new_expense("2024-01-01", "a", "1")).unwrap();

        assert!(service.delete("", true).unwrap_err().is_validation());
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_summary_by_category_matches_total() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        service.add(new_expense("2024-01-01", "food", "1.10")).unwrap();
        service.add(new_expense("2024-01-02", "rent", "900")).unwrap();
        service.add(new_expense("2024-01-03", "food", "2.20")).unwrap();
        service.add(new_expense("2024-01-04", "Food", "0.01")).unwrap();

        let summary = service.summary_by_category().unwrap();

        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.rows[0].category, "rent");
        assert_eq!(summary.rows[1].total, Money::from_cents(330));
        let sum = Money::checked_sum(summary.rows.iter().map(|r| r.total)).unwrap();
        assert_eq!(sum, service.total().unwrap());
        assert_eq!(summary.total, sum);
    }

    #[test]
    fn test_summary_by_date_range() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        service.add(new_expense("2024-02-01", "c", "7")).unwrap();
        let b = service.add(new_expense("2024-01-15", "b", "3")).unwrap();
        let a = service.add(new_expense("2024-01-01", "a", "5")).unwrap();

        let report = service
            .summary_by_date_range(date("2024-01-01"), date("2024-01-31"))
            .unwrap()
            .unwrap();
        assert_eq!(report.expenses, vec![a, b]);
        assert_eq!(report.total, Money::from_cents(800));

        assert!(service
            .summary_by_date_range(date("2025-01-01"), date("2025-12-31"))
            .unwrap()
            .is_none());

        let err = service
            .summary_by_date_range(date("2024-02-01"), date("2024-01-01"))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Range { .. }));
    }

    #[test]
    fn test_totals_too_large_are_errors() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);
        let huge = "700000000000000000000000000";
        service.add(new_expense("2024-01-01", "food", huge)).unwrap();
        service.add(new_expense("2024-01-02", "food", huge)).unwrap();

        let err = service.summary_by_category().unwrap_err();
        assert!(matches!(err, ExpenseError::Overflow(_)));
        let err = service.total().unwrap_err();
        assert!(matches!(err, ExpenseError::Overflow(_)));
        let err = service
            .summary_by_date_range(date("2024-01-01"), date("2024-01-31"))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Overflow(_)));

        assert_eq!(store.load_all().unwrap().len(), 2);
        assert_eq!(service.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_add_amount_too_large_rejected() {
        let store = MemoryStore::default();
        let service = ExpenseService::new(&store);

        let err = service
            .add(new_expense("2024-01-01", "food", "50000000000000000000000000000"))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Amount out of range"));
        assert_eq!(store.saves.get(), 0);
    }

    #[test]
    fn test_export_filtered() {
        let (temp_dir, store) = create_test_store();
        let service = ExpenseService::new(&store);
        let a = service.add(new_expense("2024-01-05", "Food", "1")).unwrap();
        service.add(new_expense("2024-01-06", "rent", "2")).unwrap();
        let c = service.add(new_expense("2024-02-05", "food", "3")).unwrap();
        service.add(new_expense("2023-12-31", "food", "4")).unwrap();

        let destination = temp_dir.path().join("out").join("food.csv");
        let filter = ExportFilter::new().category("FOOD").start(date("2024-01-01"));
        let outcome = service.export_filtered(&filter, &destination).unwrap();

        assert_eq!(outcome.count(), 2);
        assert_eq!(outcome.expenses, vec![a.clone(), c.clone()]);
        let exported = CsvExpenseStore::new(&destination).load_all().unwrap();
        assert_eq!(exported, vec![a, c]);
    }

    #[test]
    fn test_export_nothing_matches_writes_nothing() {
        let (temp_dir, store) = create_test_store();
        let service = ExpenseService::new(&store);
        service.add(new_expense("2024-01-05", "food", "1")).unwrap();

        let destination = temp_dir.path().join("none.csv");
        let outcome = service
            .export_filtered(&ExportFilter::new().category("travel"), &destination)
            .unwrap();

        assert!(outcome.is_empty());
        assert!(!destination.exists());
    }

    #[test]
    fn test_export_over_store_rejected() {
        let (_temp_dir, store) = create_test_store();
        let service = ExpenseService::new(&store);
        service.add(new_expense("2024-01-05", "food", "1")).unwrap();
        let before = fs::read(store.path()).unwrap();

        let err = service
            .export_filtered(&ExportFilter::new(), store.path())
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_changes_are_audited() {
        let (temp_dir, store) = create_test_store();
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        let service = ExpenseService::new(&store).with_audit(&audit);

        let expense = service.add(new_expense("2024-01-01", "food", "5")).unwrap();
        let update = ExpenseUpdate {
            amount: Some("6".into()),
            ..Default::default()
        };
        service.edit(&expense.id.short(), update).unwrap();
        service
            .export_filtered(&ExportFilter::new(), &temp_dir.path().join("all.csv"))
            .unwrap();
        service.delete(&expense.id.short(), true).unwrap();

        let entries = audit.read_all().unwrap();
        let operations: Vec<Operation> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            operations,
            vec![
                Operation::Create,
                Operation::Update,
                Operation::Export,
                Operation::Delete
            ]
        );
        let diff = entries[1].diff_summary.as_deref().unwrap();
        assert!(diff.contains("amount"));
    }

    #[test]
    fn test_unwritable_audit_log_blocks_changes() {
        let (temp_dir, store) = create_test_store();
        let expense = ExpenseService::new(&store)
            .add(new_expense("2024-01-01", "food", "5"))
            .unwrap();
        let before = fs::read(store.path()).unwrap();

        // A directory cannot be opened for appending
        let audit = AuditLogger::new(temp_dir.path());
        let service = ExpenseService::new(&store).with_audit(&audit);

        let err = service.add(new_expense("2024-01-02", "rent", "9")).unwrap_err();
        assert!(matches!(err, ExpenseError::Io(_)));

        let update = ExpenseUpdate {
            amount: Some("6".into()),
            ..Default::default()
        };
        assert!(service.edit(&expense.id.short(), update).is_err());
        assert!(service.delete(&expense.id.short(), true).is_err());

        let destination = temp_dir.path().join("all.csv");
        assert!(service
            .export_filtered(&ExportFilter::new(), &destination)
            .is_err());
        assert!(!destination.exists());

        assert_eq!(fs::read(store.path()).unwrap(), before);
        assert_eq!(store.load_all().unwrap(), vec![expense]);
    }

    #[test]
    fn test_without_audit_no_log_written() {
        let (temp_dir, store) = create_test_store();
        let service = ExpenseService::new(&store);
        service.add(new_expense("2024-01-01", "food", "5")).unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("expenses.csv")]);
    }
}
