//! Per-user wallet state and category identity rules.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Case folding used for category and login identity.
///
/// Unicode-aware so non-ASCII category names unify correctly.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    fold_case(a).cmp(&fold_case(b))
}

/// A user's complete financial state.
///
/// `balance` always equals inflow minus outflow over `transactions`; budget
/// keys carry the first-seen casing of their category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub balance: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: BTreeMap<String, f64>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction and applies its amount to the balance.
    pub fn apply(&mut self, transaction: Transaction) -> &Transaction {
        if transaction.kind.is_inflow() {
            self.balance += transaction.amount;
        } else {
            self.balance -= transaction.amount;
        }
        self.transactions.push(transaction);
        self.transactions.last().expect("transaction just pushed")
    }

    pub fn inflow_total(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.kind.is_inflow())
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn outflow_total(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.kind.is_outflow())
            .map(|txn| txn.amount)
            .sum()
    }

    /// Recomputes the balance from the transaction log, replacing the
    /// incrementally maintained value. Used after structural mutations so
    /// drift cannot accumulate.
    pub fn recalculate_balance(&mut self) {
        self.balance = self.inflow_total() - self.outflow_total();
    }

    /// Returns the existing casing of `category` if any transaction or budget
    /// key matches it case-insensitively.
    pub fn find_category(&self, category: &str) -> Option<&str> {
        self.transactions
            .iter()
            .map(|txn| txn.category.as_str())
            .find(|existing| eq_ignore_case(existing, category))
            .or_else(|| {
                self.budgets
                    .keys()
                    .map(String::as_str)
                    .find(|existing| eq_ignore_case(existing, category))
            })
    }

    /// Resolves a raw category name to its canonical form: the existing casing
    /// when the wallet already knows the category, otherwise the trimmed input.
    /// Returns `None` when the name is empty after trimming.
    pub fn resolve_category(&self, category: &str) -> Option<String> {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(
            self.find_category(trimmed)
                .map(str::to_string)
                .unwrap_or_else(|| trimmed.to_string()),
        )
    }
}
