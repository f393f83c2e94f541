//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling input validation, the audit trail and reports.

pub mod expense;

pub use expense::{
    validate_amount, validate_date, DeleteOutcome, EditOutcome, ExpenseService, ExpenseUpdate,
    NewExpense,
};
