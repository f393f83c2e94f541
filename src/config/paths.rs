//! Path management for the expense tracker
//!
//! ## Path Resolution Order
//!
//! For each path:
//! 1. The explicit value passed on the command line
//! 2. The matching environment variable (`EXPENSES_FILE`, `EXPENSES_AUDIT_LOG`)
//! 3. The default: `expenses.csv` in the working directory, no audit log

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ExpenseError;

/// Environment variable overriding the backing file
pub const FILE_ENV: &str = "EXPENSES_FILE";

/// Environment variable enabling the audit log
pub const AUDIT_LOG_ENV: &str = "EXPENSES_AUDIT_LOG";

/// Backing file used when nothing else is configured
pub const DEFAULT_EXPENSES_FILE: &str = "expenses.csv";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// The CSV file holding every expense
    expenses_file: PathBuf,
    /// Optional JSON-lines audit log
    audit_log: Option<PathBuf>,
}

impl ExpensePaths {
    /// Create paths for a specific backing file (useful for testing)
    pub fn new(expenses_file: impl Into<PathBuf>) -> Self {
        Self {
            expenses_file: expenses_file.into(),
            audit_log: None,
        }
    }

    /// Resolve paths from explicit values, falling back to the environment
    pub fn resolve(
        expenses_file: Option<PathBuf>,
        audit_log: Option<PathBuf>,
    ) -> Result<Self, ExpenseError> {
        Self::resolve_with(expenses_file, audit_log, |var| std::env::var_os(var))
    }

    /// Resolve paths, reading variables through `lookup` instead of the
    /// process environment
    pub fn resolve_with(
        expenses_file: Option<PathBuf>,
        audit_log: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self, ExpenseError> {
        let env_path = |var: &str| lookup(var).filter(|v| !v.is_empty()).map(PathBuf::from);

        let expenses_file = expenses_file
            .or_else(|| env_path(FILE_ENV))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPENSES_FILE));

        if expenses_file.as_os_str().is_empty() {
            return Err(ExpenseError::Config("Expenses file path is empty".into()));
        }

        Ok(Self {
            expenses_file,
            audit_log: audit_log.or_else(|| env_path(AUDIT_LOG_ENV)),
        })
    }

    /// Get the path to the backing CSV file
    pub fn expenses_file(&self) -> &Path {
        &self.expenses_file
    }

    /// Get the path to the audit log, if enabled
    pub fn audit_log(&self) -> Option<&Path> {
        self.audit_log.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(vars: &[(&str, &Path)]) -> impl Fn(&str) -> Option<OsString> {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.as_os_str().to_os_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_explicit_paths() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("mine.csv");
        let log = temp_dir.path().join("audit.log");

        let env = env_of(&[
            (FILE_ENV, Path::new("ignored.csv")),
            (AUDIT_LOG_ENV, Path::new("ignored.log")),
        ]);
        let paths =
            ExpensePaths::resolve_with(Some(file.clone()), Some(log.clone()), env).unwrap();
        assert_eq!(paths.expenses_file(), file.as_path());
        assert_eq!(paths.audit_log(), Some(log.as_path()));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom = temp_dir.path().join("from-env.csv");
        let log = temp_dir.path().join("from-env.log");

        let env = env_of(&[(FILE_ENV, custom.as_path()), (AUDIT_LOG_ENV, log.as_path())]);
        let paths = ExpensePaths::resolve_with(None, None, env).unwrap();

        assert_eq!(paths.expenses_file(), custom.as_path());
        assert_eq!(paths.audit_log(), Some(log.as_path()));
    }

    #[test]
    fn test_defaults_and_empty_env_values() {
        let env = env_of(&[(FILE_ENV, Path::new("")), (AUDIT_LOG_ENV, Path::new(""))]);
        let paths = ExpensePaths::resolve_with(None, None, env).unwrap();

        assert_eq!(paths.expenses_file(), Path::new(DEFAULT_EXPENSES_FILE));
        assert_eq!(paths.audit_log(), None);
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = ExpensePaths::resolve_with(Some(PathBuf::new()), None, |_| None).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }
}
