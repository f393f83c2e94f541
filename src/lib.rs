//! Expense Tracker - personal expenses kept in a CSV file
//!
//! This library provides the core functionality for a single-user expense
//! tracker. Every expense lives as one row of a CSV file; each operation
//! loads the whole file, works on it in memory and writes it back.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: The expense record and its validated field types
//! - `storage`: CSV file storage layer
//! - `services`: Business logic layer
//! - `reports`: Category and date range summaries
//! - `export`: Filtered CSV export
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Interactive menu and scripted subcommands
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::services::{ExpenseService, NewExpense};
//! use expense_tracker::storage::CsvExpenseStore;
//!
//! let store = CsvExpenseStore::new("expenses.csv");
//! let expense = ExpenseService::new(&store).add(NewExpense {
//!     amount: "12.50".into(),
//!     category: "food".into(),
//!     ..Default::default()
//! })?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::ExpenseError;
