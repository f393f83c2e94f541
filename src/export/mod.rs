//! Export module for the expense tracker
//!
//! Filtered CSV exports in the same schema as the backing file, so an export
//! can itself be opened as an expense store.

pub mod csv;

pub use csv::{ExportFilter, ExportOutcome};
