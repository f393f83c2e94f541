//! Scripted subcommands
//!
//! One subcommand per menu operation, for use from scripts and shells. The
//! semantics match the interactive menu; confirmation for delete is given
//! with `--yes` instead of a prompt.

use std::path::PathBuf;

use clap::Subcommand;

use crate::display::{
    format_category_summary, format_date_range_report, format_expense_details, format_expense_list,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::ExportFilter;
use crate::services::{validate_date, DeleteOutcome, ExpenseUpdate, NewExpense};

use super::Session;

/// Expense tracker subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Launch the interactive menu (the default)
    Menu,
    /// Add a new expense
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Category, defaults to "misc"
        #[arg(short, long)]
        category: Option<String>,
        /// Short description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List expenses, newest first
    List {
        /// Number of expenses to show (defaults to the recent-list size)
        #[arg(short, long, conflicts_with = "all")]
        limit: Option<usize>,
        /// Show every expense
        #[arg(long)]
        all: bool,
    },
    /// Summarize expenses
    #[command(subcommand)]
    Summary(SummaryCommands),
    /// Edit an expense
    Edit {
        /// Expense ID or ID prefix
        id: String,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete every expense whose ID starts with the given prefix
    Delete {
        /// Expense ID or ID prefix
        id: String,
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
    /// Export matching expenses to a CSV file
    Export {
        /// Output CSV file
        output: PathBuf,
        /// Only this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<String>,
    },
    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Summary subcommands
#[derive(Subcommand)]
pub enum SummaryCommands {
    /// Totals per category, largest first
    Category,
    /// Expenses between two dates with their total
    Range {
        /// Start date (YYYY-MM-DD)
        start: String,
        /// End date (YYYY-MM-DD)
        end: String,
    },
}

/// Handle a scripted subcommand
///
/// `Menu` is handled by the caller, which owns the terminal.
pub fn handle_command(session: &Session, cmd: ExpenseCommands) -> ExpenseResult<()> {
    let service = session.service();
    let symbol = session.symbol();

    match cmd {
        ExpenseCommands::Menu => {}

        ExpenseCommands::Add {
            amount,
            date,
            category,
            description,
        } => {
            let expense = service.add(NewExpense {
                date: date.unwrap_or_default(),
                category: category.unwrap_or_default(),
                amount,
                description: description.unwrap_or_default(),
            })?;

            println!("Expense added successfully.");
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::List { limit, all } => {
            let expenses = if all {
                service.list_all()?
            } else {
                service.list_recent(limit.unwrap_or(session.settings.recent_limit))?
            };

            if expenses.is_empty() {
                println!("No expenses found.");
            } else {
                print!("{}", format_expense_list(&expenses, symbol));
            }
        }

        ExpenseCommands::Summary(SummaryCommands::Category) => {
            let summary = service.summary_by_category()?;
            if summary.is_empty() {
                println!("No expenses to summarize.");
            } else {
                print!("{}", format_category_summary(&summary, symbol));
            }
        }

        ExpenseCommands::Summary(SummaryCommands::Range { start, end }) => {
            let start = validate_date(&start)?;
            let end = validate_date(&end)?;

            match service.summary_by_date_range(start, end)? {
                Some(report) => print!("{}", format_date_range_report(&report, symbol)),
                None => println!("No expenses in that range."),
            }
        }

        ExpenseCommands::Edit {
            id,
            date,
            category,
            amount,
            description,
        } => {
            let outcome = service.edit(
                &id,
                ExpenseUpdate {
                    date,
                    category,
                    amount,
                    description,
                },
            )?;

            if outcome.is_ambiguous() {
                eprintln!(
                    "Warning: {} expenses match '{}'; edited the first one.",
                    outcome.match_count, id
                );
            }
            println!("Updated successfully.");
            print!("{}", format_expense_details(&outcome.expense, symbol));
        }

        ExpenseCommands::Delete { id, yes } => match service.delete(&id, yes)? {
            DeleteOutcome::NothingToDelete => println!("No matching expense found."),
            DeleteOutcome::AwaitingConfirmation(matches) => {
                println!("Found:");
                print!("{}", format_expense_list(&matches, symbol));
                println!("Re-run with --yes to delete.");
            }
            DeleteOutcome::Deleted(removed) => {
                print!("{}", format_expense_list(&removed, symbol));
                println!("Deleted {} expense(s).", removed.len());
            }
        },

        ExpenseCommands::Export {
            output,
            category,
            from,
            to,
        } => {
            let filter = ExportFilter::from_input(
                category.as_deref().unwrap_or_default(),
                from.as_deref().unwrap_or_default(),
                to.as_deref().unwrap_or_default(),
            )?;

            let outcome = service.export_filtered(&filter, &output)?;
            if outcome.is_empty() {
                println!("No matching records.");
            } else {
                println!(
                    "Exported {} rows to {}.",
                    outcome.count(),
                    outcome.destination.display()
                );
            }
        }

        ExpenseCommands::History { limit } => {
            let audit = session.audit.as_ref().ok_or_else(|| {
                ExpenseError::Config(
                    "Audit log is not enabled; pass --audit-log or set EXPENSES_AUDIT_LOG".into(),
                )
            })?;

            let entries = audit.read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}
