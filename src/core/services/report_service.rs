//! Read-only filtering and aggregation over a wallet's history.

use std::collections::HashSet;

use crate::core::dates;
use crate::domain::report::{
    BudgetStatus, CategoryTotal, Report, ReportData, ReportFilter, OVERSPEND_WARNING,
};
use crate::domain::transaction::Transaction;
use crate::domain::wallet::{cmp_ignore_case, eq_ignore_case, fold_case, Wallet};

/// Builds ephemeral reports; nothing here mutates or persists state.
pub struct ReportService;

impl ReportService {
    /// Aggregates the wallet under the given filter. `seeded_warnings` are
    /// carried into the result ahead of any warning added here.
    pub fn build(wallet: &Wallet, filter: &ReportFilter, seeded_warnings: Vec<String>) -> Report {
        let mut missing_categories = Vec::new();
        let selected = Self::filter_transactions(wallet, filter, &mut missing_categories);

        let income_by_category = Self::sum_by_category(&selected, true);
        let expense_by_category = Self::sum_by_category(&selected, false);
        let total_income: f64 = income_by_category.iter().map(|row| row.total).sum();
        let total_expense: f64 = expense_by_category.iter().map(|row| row.total).sum();
        let budgets = Self::budget_statuses(wallet, &selected);

        let mut warnings = seeded_warnings;
        if total_expense > total_income {
            warnings.push(OVERSPEND_WARNING.to_string());
        }

        Report {
            data: ReportData {
                total_income,
                total_expense,
                income_by_category,
                expense_by_category,
                budgets,
                warnings,
            },
            missing_categories,
        }
    }

    /// Case-insensitive union of transaction categories and budget keys,
    /// deduplicated (transaction casing wins) and sorted case-insensitively.
    pub fn list_categories(wallet: &Wallet) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut categories: Vec<String> = wallet
            .transactions
            .iter()
            .map(|transaction| transaction.category.as_str())
            .chain(wallet.budgets.keys().map(String::as_str))
            .filter(|name| seen.insert(fold_case(name)))
            .map(str::to_string)
            .collect();
        categories.sort_by(|a, b| cmp_ignore_case(a, b));
        categories
    }

    /// One status row per wallet budget, sorted case-insensitively by key.
    /// `transactions` scopes the spend: callers pass the full history for
    /// notifications and the filtered selection for reports.
    pub fn budget_statuses(wallet: &Wallet, transactions: &[&Transaction]) -> Vec<BudgetStatus> {
        let spent_rows = Self::sum_by_category(transactions, false);
        let mut entries: Vec<(&String, f64)> =
            wallet.budgets.iter().map(|(key, limit)| (key, *limit)).collect();
        entries.sort_by(|a, b| cmp_ignore_case(a.0, b.0));
        entries
            .into_iter()
            .map(|(key, limit)| {
                let spent = spent_rows
                    .iter()
                    .find(|row| eq_ignore_case(&row.category, key))
                    .map(|row| row.total)
                    .unwrap_or(0.0);
                BudgetStatus::new(key.clone(), limit, spent)
            })
            .collect()
    }

    fn filter_transactions<'a>(
        wallet: &'a Wallet,
        filter: &ReportFilter,
        missing_categories: &mut Vec<String>,
    ) -> Vec<&'a Transaction> {
        let from = filter.from_date.as_deref().and_then(dates::parse_iso);
        let to = filter.to_date.as_deref().and_then(dates::parse_iso);
        // An explicitly empty filter list means "no filter"; a list that only
        // normalizes down to nothing still filters (and matches nothing).
        let categories = filter
            .categories
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(Self::normalize_filter_names);

        let mut selected: Vec<&Transaction> = wallet
            .transactions
            .iter()
            .filter(|transaction| {
                if let Some(names) = &categories {
                    if !names
                        .iter()
                        .any(|name| eq_ignore_case(name, &transaction.category))
                    {
                        return false;
                    }
                }
                // Dates that fail to parse are only ever excluded by the
                // category filter, never by a date bound.
                if let Some(transaction_date) = dates::parse_iso(&transaction.date) {
                    if let Some(bound) = from {
                        if transaction_date < bound {
                            return false;
                        }
                    }
                    if let Some(bound) = to {
                        if transaction_date > bound {
                            return false;
                        }
                    }
                }
                true
            })
            .collect();
        selected.sort_by(|a, b| a.date.cmp(&b.date));

        if let Some(names) = &categories {
            for name in names {
                if wallet.find_category(name).is_none() {
                    missing_categories.push(name.clone());
                }
            }
        }
        selected
    }

    /// Trims filter names, drops empties, deduplicates case-insensitively
    /// keeping the first casing, and sorts case-insensitively.
    fn normalize_filter_names(raw: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names: Vec<String> = raw
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(fold_case(name)))
            .map(str::to_string)
            .collect();
        names.sort_by(|a, b| cmp_ignore_case(a, b));
        names
    }

    /// Sums amounts per category over one flow direction, rows ordered
    /// case-insensitively by category with the first-seen casing kept.
    fn sum_by_category(transactions: &[&Transaction], inflow: bool) -> Vec<CategoryTotal> {
        let mut matching: Vec<&&Transaction> = transactions
            .iter()
            .filter(|transaction| {
                if inflow {
                    transaction.kind.is_inflow()
                } else {
                    transaction.kind.is_outflow()
                }
            })
            .collect();
        matching.sort_by(|a, b| cmp_ignore_case(&a.category, &b.category));

        let mut rows: Vec<CategoryTotal> = Vec::new();
        for transaction in matching {
            match rows.last_mut() {
                Some(last) if eq_ignore_case(&last.category, &transaction.category) => {
                    last.total += transaction.amount;
                }
                _ => rows.push(CategoryTotal {
                    category: transaction.category.clone(),
                    total: transaction.amount,
                }),
            }
        }
        rows
    }
}
