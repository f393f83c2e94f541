use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use expense_tracker::cli::{handle_command, run_menu, ExpenseCommands, Session};
use expense_tracker::config::{ExpensePaths, Settings};

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Personal expense tracker backed by a CSV file",
    long_about = "Records personal expenses in a CSV file and answers simple questions \
                  about them: recent spending, totals per category and totals over a \
                  date range. Run without a command for the interactive menu."
)]
struct Cli {
    /// CSV file holding the expenses [env: EXPENSES_FILE] [default: expenses.csv]
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Append a JSON-lines audit entry for every change [env: EXPENSES_AUDIT_LOG]
    #[arg(long, global = true)]
    audit_log: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, global = true, env = "EXPENSES_CONFIG")]
    config: Option<PathBuf>,

    /// Currency symbol shown in front of amounts
    #[arg(long, global = true, env = "EXPENSES_CURRENCY")]
    currency: Option<String>,

    #[command(subcommand)]
    command: Option<ExpenseCommands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::resolve(cli.file, cli.audit_log)?;
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(currency) = cli.currency {
        settings = settings.with_currency(currency);
    }

    let session = Session::open(&paths, settings);

    match cli.command {
        None | Some(ExpenseCommands::Menu) => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            run_menu(&session, &mut input, &mut output)?;
        }
        Some(cmd) => handle_command(&session, cmd)?,
    }

    Ok(())
}
