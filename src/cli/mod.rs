//! CLI command handlers
//!
//! This module contains the interactive menu and the scripted subcommands,
//! bridging clap argument parsing and terminal prompts with the service layer.

pub mod commands;
pub mod menu;
pub mod prompt;

pub use commands::{handle_command, ExpenseCommands, SummaryCommands};
pub use menu::{run_menu, MenuChoice};

use crate::audit::AuditLogger;
use crate::config::{ExpensePaths, Settings};
use crate::services::ExpenseService;
use crate::storage::CsvExpenseStore;

/// Everything a command needs: the store, the optional audit log and settings
#[derive(Debug, Clone)]
pub struct Session {
    pub store: CsvExpenseStore,
    pub audit: Option<AuditLogger>,
    pub settings: Settings,
}

impl Session {
    /// Open a session on the configured paths
    ///
    /// Nothing is read or created until a command runs.
    pub fn open(paths: &ExpensePaths, settings: Settings) -> Self {
        Self {
            store: CsvExpenseStore::new(paths.expenses_file()),
            audit: paths.audit_log().map(AuditLogger::new),
            settings,
        }
    }

    /// An expense service bound to this session
    pub fn service(&self) -> ExpenseService<'_> {
        let service = ExpenseService::new(&self.store)
            .with_default_category(self.settings.default_category.clone());
        match &self.audit {
            Some(audit) => service.with_audit(audit),
            None => service,
        }
    }

    /// Currency symbol for display
    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}
