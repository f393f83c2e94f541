//! Audit entry data structures
//!
//! Defines the structure of audit log entries including operation types and
//! the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was added
    Create,
    /// Expense was edited
    Update,
    /// Expense was deleted
    Delete,
    /// Filtered expenses were written to an export file
    Export,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Export => write!(f, "EXPORT"),
        }
    }
}

/// A single audit log entry
///
/// Records a single operation with optional before/after values for tracking
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Expense id, or the destination path for exports
    pub entity_id: String,

    /// Human-readable description of the entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// JSON representation of the expense before the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation of the expense after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry for an added expense
    pub fn create(expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_id: expense.id.to_string(),
            entity_name: Some(describe(expense)),
            before: None,
            after: serde_json::to_value(expense).ok(),
            diff_summary: None,
        }
    }

    /// Create a new audit entry for an edited expense
    pub fn update(before: &Expense, after: &Expense, diff_summary: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_id: after.id.to_string(),
            entity_name: Some(describe(after)),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
        }
    }

    /// Create a new audit entry for a deleted expense
    pub fn delete(expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_id: expense.id.to_string(),
            entity_name: Some(describe(expense)),
            before: serde_json::to_value(expense).ok(),
            after: None,
            diff_summary: None,
        }
    }

    /// Create a new audit entry for an export
    pub fn export(destination: impl Into<String>, count: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Export,
            entity_id: destination.into(),
            entity_name: None,
            before: None,
            after: None,
            diff_summary: Some(format!("{} expenses exported", count)),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

fn describe(expense: &Expense) -> String {
    format!("{} {} {}", expense.date, expense.category, expense.amount)
}
