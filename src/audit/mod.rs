//! Audit logging system for the expense tracker
//!
//! Records every add, edit, delete and export with before/after values in an
//! append-only audit log. The log is optional and only written when a path
//! is configured.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single audit log entry with timestamp, operation, the
//!   affected expense id and optional before/after snapshots.
//! - `AuditLogger`: writes entries to the log file as line-delimited JSON.
//! - `generate_diff`: builds a human-readable summary of changed fields.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger, generate_diff};
//!
//! let logger = AuditLogger::new("audit.log");
//! logger.log(&AuditEntry::create(&expense))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
