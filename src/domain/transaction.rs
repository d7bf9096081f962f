//! Domain types representing recorded wallet activity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction and origin of a recorded amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
    TransferOut,
    TransferIn,
}

impl TransactionKind {
    /// Income and incoming transfers add to the balance.
    pub fn is_inflow(self) -> bool {
        matches!(self, TransactionKind::Income | TransactionKind::TransferIn)
    }

    /// Expenses and outgoing transfers subtract from the balance.
    pub fn is_outflow(self) -> bool {
        matches!(self, TransactionKind::Expense | TransactionKind::TransferOut)
    }
}

/// A single immutable ledger entry.
///
/// Only `category` is ever rewritten after creation, and only by a category
/// rename. The id is an opaque unique string; nothing parses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            category: category.into(),
            amount,
            description: description.into(),
            date: date.into(),
            counterparty: None,
        }
    }

    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }
}
