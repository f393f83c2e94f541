//! Expense display formatting
//!
//! One line per expense: short id, date, category, amount and description,
//! separated by `|` so the columns line up in a terminal.

use crate::models::{format_date, Expense, Money};

use super::report::fit;

/// Width of the category column
pub const CATEGORY_WIDTH: usize = 12;

/// Width of the amount column, excluding the currency symbol
pub const AMOUNT_WIDTH: usize = 8;

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense, symbol: &str) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        expense.id.short(),
        format_date(expense.date),
        fit(&expense.category, CATEGORY_WIDTH),
        format_amount(expense.amount, symbol),
        expense.description
    )
}

/// Format an amount as the symbol followed by the right-aligned value
pub fn format_amount(amount: Money, symbol: &str) -> String {
    format!("{}{:>width$}", symbol, amount.to_string(), width = AMOUNT_WIDTH)
}

/// Format a list of expenses, one row per line
pub fn format_expense_list(expenses: &[Expense], symbol: &str) -> String {
    let mut output = String::new();
    for expense in expenses {
        output.push_str(&format_expense_row(expense, symbol));
        output.push('\n');
    }
    output
}

/// Format every field of an expense, including the full id
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", format_date(expense.date)));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_amount, parse_date, ExpenseId};

    fn test_expense() -> Expense {
        let mut expense = Expense::new(
            parse_date("2024-01-15").unwrap(),
            "food",
            parse_amount("12.5").unwrap(),
            "lunch",
        );
        expense.id = "3f2a9c1e-0000-4000-8000-000000000000"
            .parse::<ExpenseId>()
            .unwrap();
        expense
    }

    #[test]
    fn test_format_row() {
        assert_eq!(
            format_expense_row(&test_expense(), "₹"),
            "3f2a9c1e | 2024-01-15 | food         | ₹   12.50 | lunch"
        );
    }

    #[test]
    fn test_long_category_is_cut() {
        let mut expense = test_expense();
        expense.category = "entertainment & leisure".into();
        let row = format_expense_row(&expense, "$");
        assert!(row.contains("| entertainmen | $"));
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_amount(parse_amount("-3").unwrap(), "$"), "$   -3.00");
    }

    #[test]
    fn test_list() {
        let list = format_expense_list(&[test_expense(), test_expense()], "₹");
        assert_eq!(list.lines().count(), 2);
        assert!(format_expense_list(&[], "₹").is_empty());
    }

    #[test]
    fn test_details() {
        let details = format_expense_details(&test_expense(), "₹");
        assert!(details.contains("3f2a9c1e-0000-4000-8000-000000000000"));
        assert!(details.contains("Amount:      ₹12.50"));
        assert!(details.contains("Description: lunch"));
    }
}
