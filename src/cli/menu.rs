//! Interactive menu
//!
//! The numbered menu loop. Each option gathers its input through prompts and
//! hands it to the expense service; an error is reported and the loop
//! carries on with the next prompt.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::display::{
    format_category_summary, format_date_range_report, format_expense_list, format_expense_row,
    separator, truncate,
};
use crate::error::ExpenseResult;
use crate::export::ExportFilter;
use crate::services::{validate_amount, validate_date, DeleteOutcome, ExpenseUpdate, NewExpense};
use crate::storage::ExpenseStore;

use super::prompt::{prompt_string, read_line};
use super::Session;

const MENU_TITLE: &str = "Personal Expense Tracker";

const MENU_OPTIONS: &[&str] = &[
    "1) Add expense",
    "2) View recent expenses",
    "3) View all expenses",
    "4) Summary by category",
    "5) Summary by date range",
    "6) Edit expense",
    "7) Delete expense",
    "8) Export filtered CSV",
    "9) Quit",
];

/// Description length shown inside edit prompts
const PROMPT_PREVIEW_LEN: usize = 30;

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    ViewRecent,
    ViewAll,
    CategorySummary,
    DateRangeSummary,
    Edit,
    Delete,
    Export,
    Quit,
}

impl MenuChoice {
    /// Parse the number typed at the menu prompt
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::ViewRecent),
            "3" => Some(MenuChoice::ViewAll),
            "4" => Some(MenuChoice::CategorySummary),
            "5" => Some(MenuChoice::DateRangeSummary),
            "6" => Some(MenuChoice::Edit),
            "7" => Some(MenuChoice::Delete),
            "8" => Some(MenuChoice::Export),
            "9" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// Run the menu until the user quits or input ends
pub fn run_menu<R: BufRead, W: Write>(
    session: &Session,
    input: &mut R,
    output: &mut W,
) -> ExpenseResult<()> {
    session.store.ensure_initialized()?;

    loop {
        print_menu(output)?;

        let choice = match read_line(input, output, "Choose an option (1-9): ") {
            Ok(Some(choice)) => choice,
            Ok(None) => {
                writeln!(output)?;
                break;
            }
            Err(e) if e.is_validation() => {
                writeln!(output)?;
                writeln!(output, "Error: {}", e)?;
                continue;
            }
            Err(e) => return Err(e),
        };

        let Some(choice) = MenuChoice::parse(&choice) else {
            writeln!(output, "Invalid choice. Please select between 1-9.")?;
            continue;
        };

        if choice == MenuChoice::Quit {
            writeln!(output, "Goodbye.")?;
            break;
        }

        if let Err(e) = run_choice(session, choice, input, output) {
            writeln!(output, "Error: {}", e)?;
        }
    }

    Ok(())
}

fn print_menu<W: Write>(output: &mut W) -> ExpenseResult<()> {
    writeln!(output)?;
    writeln!(output, "{}", MENU_TITLE)?;
    writeln!(output, "{}", separator(MENU_TITLE.chars().count()))?;
    for option in MENU_OPTIONS {
        writeln!(output, "{}", option)?;
    }
    Ok(())
}

fn run_choice<R: BufRead, W: Write>(
    session: &Session,
    choice: MenuChoice,
    input: &mut R,
    output: &mut W,
) -> ExpenseResult<()> {
    match choice {
        MenuChoice::Add => add_expense(session, input, output),
        MenuChoice::ViewRecent => {
            view_expenses(session, Some(session.settings.recent_limit), output)
        }
        MenuChoice::ViewAll => view_expenses(session, None, output),
        MenuChoice::CategorySummary => summary_by_category(session, output),
        MenuChoice::DateRangeSummary => summary_by_date_range(session, input, output),
        MenuChoice::Edit => edit_expense(session, input, output),
        MenuChoice::Delete => delete_expense(session, input, output),
        MenuChoice::Export => export_filtered(session, input, output),
        MenuChoice::Quit => Ok(()),
    }
}

fn add_expense<R: BufRead, W: Write>(
    session: &Session,
    input: &mut R,
    output: &mut W,
) -> ExpenseResult<()> {
    writeln!(output)?;
    writeln!(output, "Add a new expense (leave date blank for today).")?;

    let date = prompt_string(input, output, "Date (YYYY-MM-DD): ")?;
    if !date.is_empty() {
        validate_date(&date)?;
    }
    let category = prompt_string(input, output, "Category (e.g., food, travel, bills): ")?;
    let amount = prompt_string(input, output, "Amount (numbers only): ")?;
    validate_amount(&amount)?;
    let description = prompt_string(input, output, "Short description: ")?;

    let expense = session.service().add(NewExpense {
        date,
        category,
        amount,
        description,
    })?;

    writeln!(output, "Expense added successfully.")?;
    writeln!(output, "{}", format_expense_row(&expense, session.symbol()))?;
    Ok(())
}

fn view_expenses<W: Write>(
    session: &Session,
    limit: Option<usize>,
    output: &mut W,
) -> ExpenseResult<()> {
    let service = session.service();
    let expenses = match limit {
        Some(limit) => service.list_recent(limit)?,
        None => service.list_all()?,
    };

    writeln!(output)?;
    if expenses.is_empty() {
        writeln!(output, "No expenses found.")?;
        return Ok(());
    }

    let heading = if limit.is_some() {
        "Recent expenses:"
    } else {
        "All expenses:"
    };
    writeln!(output, "{}", heading)?;
    write!(output, "{}", format_expense_list(&expenses, session.symbol()))?;
    Ok(())
}

fn summary_by_category<W: Write>(session: &Session, output: &mut W) -> ExpenseResult<()> {
    let summary = session.service().summary_by_category()?;

    writeln!(output)?;
    if summary.is_empty() {
        writeln!(output, "No expenses to summarize.")?;
        return Ok(());
    }

    write!(output, "{}", format_category_summary(&summary, session.symbol()))?;
    Ok(())
}

fn summary_by_date_range<R: BufRead, W: Write>(
    session: &Session,
    input: &mut R,
    output: &mut W,
) -> ExpenseResult<()> {
    let service = session.service();
    if service.list_all()?.is_empty() {
        writeln!(output)?;
        writeln!(output, "No expenses to summarize.")?;
        return Ok(());
    }

    let start = prompt_string(input, output, "Start date (YYYY-MM-DD): ")?;
    let end = prompt_string(input, output, "End date (YYYY-MM-DD): ")?;
    let start = validate_date(&start)?;
    let end = validate_date(&end)?;

    match service.summary_by_date_range(start, end)? {
        Some(report) => {
            writeln!(output)?;
            write!(output, "{}", format_date_range_report(&report, session.symbol()))?;
        }
        None => writeln!(output, "No expenses in that range.")?,
    }
    Ok(())
}

fn edit_expense<R: BufRead, W: Write>(
    session: &Session,
    input: &mut R,
    output: &mut W,
) -> ExpenseResult<()> {
    let service = session.service();
    let prefix = prompt_string(input, output, "Enter expense id (first 8 chars) to edit: ")?;
    if prefix.is_empty() {
        writeln!(output, "No expense id given.")?;
        return Ok(());
    }

    let matches = service.find_by_id_prefix(&prefix)?;
    let Some(current) = matches.first() else {
        writeln!(output, "No matching expense found.")?;
        return Ok(());
    };

    if matches.len() > 1 {
        writeln!(
            output,
            "Warning: {} expenses match '{}'; editing the first one.",
            matches.len(),
            prefix
        )?;
    }
    writeln!(output, "Current entry:")?;
    writeln!(output, "{}", format_expense_row(current, session.symbol()))?;

    let date = prompt_string(input, output, &format!("Date [{}]: ", current.date))?;
    if !date.is_empty() {
        validate_date(&date)?;
    }
    let category = prompt_string(input, output, &format!("Category [{}]: ", current.category))?;
    let amount = prompt_string(input, output, &format!("Amount [{}]: ", current.amount))?;
    if !amount.is_empty() {
        validate_amount(&amount)?;
    }
    let description = prompt_string(
        input,
        output,
        &format!(
            "Description [{}]: ",
            truncate(&current.description, PROMPT_PREVIEW_LEN)
        ),
    )?;

    service.edit(
        &current.id.to_string(),
        ExpenseUpdate {
            date: Some(date),
            category: Some(category),
            amount: Some(amount),
            description: Some(description),
        },
    )?;

    writeln!(output, "Updated successfully.")?;
    Ok(())
}

fn delete_expense<R: BufRead, W: Write>(
    session: &Session,
    input: &mut R,
    output: &mut W,
) -> ExpenseResult<()> {
    let service = session.service();
    let prefix = prompt_string(input, output, "Enter expense id (first 8 chars) to delete: ")?;
    if prefix.is_empty() {
        writeln!(output, "No expense id given.")?;
        return Ok(());
    }

    let outcome = service.delete(&prefix, false)?;
    if outcome == DeleteOutcome::NothingToDelete {
        writeln!(output, "No matching expense found.")?;
        return Ok(());
    }

    writeln!(output, "Found:")?;
    write!(output, "{}", format_expense_list(outcome.matches(), session.symbol()))?;

    let confirm = prompt_string(input, output, "Type YES to confirm delete: ")?;
    if confirm != "YES" {
        writeln!(output, "Cancelled.")?;
        return Ok(());
    }

    let deleted = service.delete(&prefix, true)?.deleted_count();
    writeln!(output, "Deleted {} expense(s).", deleted)?;
    Ok(())
}

fn export_filtered<R: BufRead, W: Write>(
    session: &Session,
    input: &mut R,
    output: &mut W,
) -> ExpenseResult<()> {
    let service = session.service();
    let expenses = service.list_all()?;
    if expenses.is_empty() {
        writeln!(output, "No data to export.")?;
        return Ok(());
    }

    let category = prompt_string(input, output, "Filter by category (leave blank for all): ")?;
    let start = prompt_string(input, output, "Start date (YYYY-MM-DD) leave blank for none: ")?;
    let end = prompt_string(input, output, "End date (YYYY-MM-DD) leave blank for none: ")?;
    let filter = ExportFilter::from_input(&category, &start, &end)?;

    if !expenses.iter().any(|e| filter.matches(e)) {
        writeln!(output, "No matching records.")?;
        return Ok(());
    }

    let default_file = &session.settings.default_export_file;
    let destination = prompt_string(
        input,
        output,
        &format!("Output CSV filename (default {}): ", default_file),
    )?;
    let destination = if destination.is_empty() {
        PathBuf::from(default_file)
    } else {
        PathBuf::from(destination)
    };

    let outcome = service.export_filtered(&filter, &destination)?;
    writeln!(
        output,
        "Exported {} rows to {}.",
        outcome.count(),
        outcome.destination.display()
    )?;
    Ok(())
}
