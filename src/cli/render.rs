//! Plain-text rendering of report data. Amounts are shown with two decimals
//! only here, at the presentation boundary.

use colored::Colorize;

use crate::domain::report::{BudgetStatus, CategoryTotal, Report};

use super::output;

const NAME_WIDTH: usize = 24;
const AMOUNT_WIDTH: usize = 12;

pub fn print_report(report: &Report) {
    let data = &report.data;
    output::section("Report");
    println!(
        "{:<NAME_WIDTH$}{:>AMOUNT_WIDTH$.2}",
        "Total income", data.total_income
    );
    println!(
        "{:<NAME_WIDTH$}{:>AMOUNT_WIDTH$.2}",
        "Total expense", data.total_expense
    );

    print_category_rows("Income by category", &data.income_by_category);
    print_category_rows("Expense by category", &data.expense_by_category);
    print_budget_statuses(&data.budgets);

    for missing in &report.missing_categories {
        output::warning(format!("Unknown category in filter: {missing}"));
    }
    for warning in &data.warnings {
        output::warning(warning);
    }
}

fn print_category_rows(title: &str, rows: &[CategoryTotal]) {
    if rows.is_empty() {
        return;
    }
    output::section(title);
    for row in rows {
        println!("{:<NAME_WIDTH$}{:>AMOUNT_WIDTH$.2}", row.category, row.total);
    }
}

pub fn print_budget_statuses(statuses: &[BudgetStatus]) {
    if statuses.is_empty() {
        return;
    }
    output::section("Budgets");
    println!(
        "{:<NAME_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
        "Category", "Limit", "Spent", "Remaining"
    );
    for status in statuses {
        // Pad before coloring so ANSI escapes do not skew the column.
        let remaining = format!("{:>AMOUNT_WIDTH$.2}", status.remaining);
        let remaining = if status.remaining < 0.0 {
            remaining.red().to_string()
        } else {
            remaining
        };
        println!(
            "{:<NAME_WIDTH$}{:>AMOUNT_WIDTH$.2}{:>AMOUNT_WIDTH$.2}{}",
            status.category, status.limit, status.spent, remaining
        );
    }
}

pub fn print_categories(categories: &[String]) {
    output::section("Categories");
    if categories.is_empty() {
        output::info("No categories yet.");
        return;
    }
    for category in categories {
        println!("- {category}");
    }
}
