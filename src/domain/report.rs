//! Derived, never-persisted report types.
//!
//! Aggregation rows are ordered vectors rather than maps: the iteration order
//! (case-insensitive by category) is part of the contract and callers must not
//! re-sort.

use serde::Serialize;

/// Warning appended whenever outflows exceed inflows over the evaluated set.
pub const OVERSPEND_WARNING: &str = "Expenses exceed income.";

/// One aggregated category row of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Snapshot of one budget compared against actual spend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl BudgetStatus {
    pub fn new(category: impl Into<String>, limit: f64, spent: f64) -> Self {
        Self {
            category: category.into(),
            limit,
            spent,
            remaining: limit - spent,
        }
    }
}

/// Aggregated view over a (possibly filtered) transaction set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportData {
    pub total_income: f64,
    pub total_expense: f64,
    pub income_by_category: Vec<CategoryTotal>,
    pub expense_by_category: Vec<CategoryTotal>,
    pub budgets: Vec<BudgetStatus>,
    pub warnings: Vec<String>,
}

/// Report payload plus the filter names that matched nothing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub data: ReportData,
    pub missing_categories: Vec<String>,
}

/// Optional category/date constraints for a report request.
///
/// Date bounds are the raw `YYYY-MM-DD` strings as entered; an unparseable
/// bound behaves as if absent, since entry-side validation already happened.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub categories: Option<Vec<String>>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl ReportFilter {
    pub fn for_categories(categories: Vec<String>) -> Self {
        Self {
            categories: Some(categories),
            ..Self::default()
        }
    }

    pub fn for_period(from_date: Option<String>, to_date: Option<String>) -> Self {
        Self {
            from_date,
            to_date,
            ..Self::default()
        }
    }
}
