//! Mutating ledger operations and their validation rules.
//!
//! Every operation validates fully before touching any wallet, so a failed
//! call leaves the caller's state unchanged.

use std::collections::BTreeMap;

use crate::core::dates;
use crate::domain::report::OVERSPEND_WARNING;
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::domain::user::User;
use crate::domain::wallet::{eq_ignore_case, fold_case, Wallet};
use crate::errors::LedgerError;

use super::report_service::ReportService;
use super::{Outcome, ServiceResult};

/// Fixed category both legs of a transfer are recorded under.
pub const TRANSFER_CATEGORY: &str = "Transfer";

/// Provides validated mutation helpers for a user's wallet.
pub struct LedgerService;

impl LedgerService {
    /// Records an income transaction and credits the balance.
    pub fn record_income(
        user: &mut User,
        category: &str,
        amount: f64,
        date: &str,
        description: &str,
    ) -> ServiceResult<Outcome<Transaction>> {
        Self::record(user, TransactionKind::Income, category, amount, date, description)
    }

    /// Records an expense transaction and debits the balance. Fails when the
    /// balance would drop below zero.
    pub fn record_expense(
        user: &mut User,
        category: &str,
        amount: f64,
        date: &str,
        description: &str,
    ) -> ServiceResult<Outcome<Transaction>> {
        Self::record(user, TransactionKind::Expense, category, amount, date, description)
    }

    fn record(
        user: &mut User,
        kind: TransactionKind,
        category: &str,
        amount: f64,
        date: &str,
        description: &str,
    ) -> ServiceResult<Outcome<Transaction>> {
        if amount <= 0.0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        let category = user
            .wallet
            .resolve_category(category)
            .ok_or(LedgerError::EmptyCategory)?;
        let date = dates::resolve_entry_date(date)?;
        if kind.is_outflow() && user.wallet.balance - amount < 0.0 {
            return Err(LedgerError::InsufficientFunds);
        }
        let transaction = Transaction::new(kind, category, amount, description.trim(), date);
        let created = user.wallet.apply(transaction).clone();
        tracing::debug!(
            login = %user.login,
            kind = ?created.kind,
            amount = created.amount,
            "recorded transaction"
        );
        Ok(Outcome::with_notice(created, Self::notifications(&user.wallet)))
    }

    /// Moves funds between two registered users as a pair of linked
    /// transactions. The registry is keyed by lowercased login; both wallets
    /// mutate only after every check has passed.
    pub fn transfer(
        users: &mut BTreeMap<String, User>,
        sender_login: &str,
        receiver_login: &str,
        amount: f64,
        date: &str,
        description: &str,
    ) -> ServiceResult<Outcome<()>> {
        let sender_key = fold_case(sender_login.trim());
        let receiver_key = fold_case(receiver_login.trim());
        let (sender_name, sender_balance, receiver_name) =
            match (users.get(&sender_key), users.get(&receiver_key)) {
                (Some(sender), Some(receiver)) => (
                    sender.login.clone(),
                    sender.wallet.balance,
                    receiver.login.clone(),
                ),
                _ => return Err(LedgerError::UnknownTransferParty),
            };
        if amount <= 0.0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        let date = dates::resolve_entry_date(date)?;
        if sender_balance - amount < 0.0 {
            return Err(LedgerError::InsufficientFunds);
        }
        let description = description.trim();
        let outgoing = Transaction::new(
            TransactionKind::TransferOut,
            TRANSFER_CATEGORY,
            amount,
            description,
            date.clone(),
        )
        .with_counterparty(receiver_name);
        let incoming = Transaction::new(
            TransactionKind::TransferIn,
            TRANSFER_CATEGORY,
            amount,
            description,
            date,
        )
        .with_counterparty(sender_name);
        if let Some(sender) = users.get_mut(&sender_key) {
            sender.wallet.apply(outgoing);
        }
        if let Some(receiver) = users.get_mut(&receiver_key) {
            receiver.wallet.apply(incoming);
        }
        tracing::debug!(
            from = %sender_key,
            to = %receiver_key,
            amount,
            "transferred funds"
        );
        let notice = users
            .get(&sender_key)
            .and_then(|sender| Self::notifications(&sender.wallet));
        Ok(Outcome::with_notice((), notice))
    }

    /// Creates or replaces the budget for a category.
    pub fn set_budget(user: &mut User, category: &str, limit: f64) -> ServiceResult<()> {
        let category = Self::budget_category(user, category, limit)?;
        user.wallet.budgets.insert(category, limit);
        Ok(())
    }

    /// Replaces an existing budget; fails when none is set yet.
    pub fn update_budget(user: &mut User, category: &str, limit: f64) -> ServiceResult<()> {
        let category = Self::budget_category(user, category, limit)?;
        if !user.wallet.budgets.contains_key(&category) {
            return Err(LedgerError::BudgetNotFound(category));
        }
        user.wallet.budgets.insert(category, limit);
        Ok(())
    }

    /// Deletes the budget for a category; fails when none is set.
    pub fn remove_budget(user: &mut User, category: &str) -> ServiceResult<()> {
        let category = user
            .wallet
            .resolve_category(category)
            .ok_or(LedgerError::EmptyCategory)?;
        if user.wallet.budgets.remove(&category).is_none() {
            return Err(LedgerError::BudgetNotFound(category));
        }
        Ok(())
    }

    fn budget_category(user: &User, category: &str, limit: f64) -> ServiceResult<String> {
        if limit < 0.0 {
            return Err(LedgerError::NegativeBudgetLimit);
        }
        user.wallet
            .resolve_category(category)
            .ok_or(LedgerError::EmptyCategory)
    }

    /// Rewrites every matching transaction category and moves any budget entry
    /// to the new name. At least one of the two must match for success.
    pub fn rename_category(user: &mut User, old_name: &str, new_name: &str) -> ServiceResult<()> {
        let from = user
            .wallet
            .resolve_category(old_name)
            .ok_or(LedgerError::EmptyCategory)?;
        let to = new_name.trim();
        if to.is_empty() {
            return Err(LedgerError::EmptyCategory);
        }
        let wallet = &mut user.wallet;
        let mut touched = false;
        for transaction in &mut wallet.transactions {
            if eq_ignore_case(&transaction.category, &from) {
                transaction.category = to.to_string();
                touched = true;
            }
        }
        if let Some(limit) = wallet.budgets.remove(&from) {
            wallet.budgets.insert(to.to_string(), limit);
            touched = true;
        }
        if !touched {
            return Err(LedgerError::CategoryNotFound(from));
        }
        tracing::debug!(login = %user.login, from = %from, to, "renamed category");
        Ok(())
    }

    /// Deletes every transaction under the category along with any budget
    /// entry, then recomputes the balance from the surviving transactions.
    pub fn remove_category(user: &mut User, category: &str) -> ServiceResult<()> {
        let target = user
            .wallet
            .resolve_category(category)
            .ok_or(LedgerError::EmptyCategory)?;
        let wallet = &mut user.wallet;
        let before = wallet.transactions.len();
        wallet
            .transactions
            .retain(|transaction| !eq_ignore_case(&transaction.category, &target));
        let mut removed = wallet.transactions.len() != before;
        if wallet.budgets.remove(&target).is_some() {
            removed = true;
        }
        if !removed {
            return Err(LedgerError::CategoryNotFound(target));
        }
        wallet.recalculate_balance();
        tracing::debug!(login = %user.login, category = %target, "removed category");
        Ok(())
    }

    /// Advisory notices computed after a mutation, over the wallet's entire
    /// history (reports window the spend instead; the two differ on purpose).
    fn notifications(wallet: &Wallet) -> Option<String> {
        let mut notices: Vec<String> = Vec::new();
        if wallet.balance == 0.0 {
            notices.push("Balance is exactly 0.".into());
        }
        let history: Vec<&Transaction> = wallet.transactions.iter().collect();
        for status in ReportService::budget_statuses(wallet, &history) {
            if status.limit <= 0.0 {
                continue;
            }
            if status.remaining < 0.0 {
                notices.push(format!("Budget exceeded for category: {}.", status.category));
            } else if status.remaining <= status.limit * 0.2 {
                notices.push(format!(
                    "80% of budget spent for category: {}.",
                    status.category
                ));
            }
        }
        if wallet.outflow_total() > wallet.inflow_total() {
            notices.push(OVERSPEND_WARNING.into());
        }
        if notices.is_empty() {
            None
        } else {
            Some(notices.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new("alice", "hash")
    }

    #[test]
    fn record_income_rejects_non_positive_amounts() {
        let mut user = user();
        for amount in [0.0, -5.0] {
            let err = LedgerService::record_income(&mut user, "Salary", amount, "", "")
                .expect_err("amount must be rejected");
            assert_eq!(err, LedgerError::NonPositiveAmount);
        }
        assert!(user.wallet.transactions.is_empty());
    }

    #[test]
    fn record_income_rejects_blank_category_and_bad_date() {
        let mut user = user();
        assert_eq!(
            LedgerService::record_income(&mut user, "   ", 10.0, "", "").unwrap_err(),
            LedgerError::EmptyCategory
        );
        assert_eq!(
            LedgerService::record_income(&mut user, "Salary", 10.0, "01/02/2026", "").unwrap_err(),
            LedgerError::InvalidDate
        );
        assert_eq!(user.wallet.balance, 0.0);
    }

    #[test]
    fn record_income_defaults_empty_date_to_today() {
        let mut user = user();
        let outcome = LedgerService::record_income(&mut user, "Salary", 10.0, "  ", "").unwrap();
        assert_eq!(outcome.value.date, dates::today_iso());
    }

    #[test]
    fn record_expense_never_drives_balance_negative() {
        let mut user = user();
        LedgerService::record_income(&mut user, "Salary", 1000.0, "2026-01-01", "").unwrap();
        let err = LedgerService::record_expense(&mut user, "Food", 1500.0, "2026-01-02", "")
            .expect_err("overdraft must fail");
        assert_eq!(err, LedgerError::InsufficientFunds);
        assert_eq!(user.wallet.balance, 1000.0);
        assert_eq!(user.wallet.transactions.len(), 1);
    }

    #[test]
    fn recording_unifies_category_casing() {
        let mut user = user();
        LedgerService::record_income(&mut user, "Food", 10.0, "2026-01-01", "").unwrap();
        let outcome =
            LedgerService::record_expense(&mut user, "fOOD", 5.0, "2026-01-02", "").unwrap();
        assert_eq!(outcome.value.category, "Food");
    }

    #[test]
    fn zero_balance_notice_is_emitted() {
        let mut user = user();
        LedgerService::record_income(&mut user, "Salary", 100.0, "2026-01-01", "").unwrap();
        let outcome =
            LedgerService::record_expense(&mut user, "Food", 100.0, "2026-01-02", "").unwrap();
        let notice = outcome.notice.expect("notice expected");
        assert!(notice.contains("Balance is exactly 0."), "got: {notice}");
    }

    #[test]
    fn budget_notices_track_all_time_spend() {
        let mut user = user();
        LedgerService::record_income(&mut user, "Salary", 1000.0, "2026-01-01", "").unwrap();
        LedgerService::set_budget(&mut user, "Food", 100.0).unwrap();

        let outcome =
            LedgerService::record_expense(&mut user, "Food", 85.0, "2026-01-02", "").unwrap();
        let notice = outcome.notice.expect("80% notice expected");
        assert!(notice.contains("80% of budget spent for category: Food."), "got: {notice}");

        let outcome =
            LedgerService::record_expense(&mut user, "Food", 30.0, "2026-01-03", "").unwrap();
        let notice = outcome.notice.expect("exceeded notice expected");
        assert!(notice.contains("Budget exceeded for category: Food."), "got: {notice}");
    }

    #[test]
    fn zero_limit_budgets_never_notify() {
        let mut user = user();
        LedgerService::record_income(&mut user, "Salary", 100.0, "2026-01-01", "").unwrap();
        LedgerService::set_budget(&mut user, "Food", 0.0).unwrap();
        let outcome =
            LedgerService::record_expense(&mut user, "Food", 10.0, "2026-01-02", "").unwrap();
        if let Some(notice) = outcome.notice {
            assert!(!notice.contains("Food"), "unexpected notice: {notice}");
        }
    }

    #[test]
    fn update_budget_requires_existing_entry() {
        let mut user = user();
        assert!(matches!(
            LedgerService::update_budget(&mut user, "Food", 100.0),
            Err(LedgerError::BudgetNotFound(_))
        ));
        LedgerService::set_budget(&mut user, "Food", 100.0).unwrap();
        LedgerService::update_budget(&mut user, "food", 250.0).unwrap();
        assert_eq!(user.wallet.budgets.get("Food"), Some(&250.0));
        assert_eq!(user.wallet.budgets.len(), 1);
    }

    #[test]
    fn set_budget_rejects_negative_limits() {
        let mut user = user();
        assert_eq!(
            LedgerService::set_budget(&mut user, "Food", -1.0).unwrap_err(),
            LedgerError::NegativeBudgetLimit
        );
        assert!(user.wallet.budgets.is_empty());
    }

    #[test]
    fn remove_budget_requires_existing_entry() {
        let mut user = user();
        assert!(matches!(
            LedgerService::remove_budget(&mut user, "Food"),
            Err(LedgerError::BudgetNotFound(_))
        ));
        LedgerService::set_budget(&mut user, "Food", 100.0).unwrap();
        LedgerService::remove_budget(&mut user, "FOOD").unwrap();
        assert!(user.wallet.budgets.is_empty());
    }

    #[test]
    fn rename_category_rewrites_transactions_and_moves_budget() {
        let mut user = user();
        LedgerService::record_income(&mut user, "Food", 100.0, "2026-01-01", "").unwrap();
        LedgerService::set_budget(&mut user, "Food", 50.0).unwrap();
        LedgerService::rename_category(&mut user, "fOOd", "Meals").unwrap();
        assert_eq!(user.wallet.transactions[0].category, "Meals");
        assert_eq!(user.wallet.budgets.get("Meals"), Some(&50.0));
        assert!(user.wallet.budgets.get("Food").is_none());
    }

    #[test]
    fn rename_category_fails_when_nothing_matches() {
        let mut user = user();
        assert!(matches!(
            LedgerService::rename_category(&mut user, "Missing", "New"),
            Err(LedgerError::CategoryNotFound(_))
        ));
        assert_eq!(
            LedgerService::rename_category(&mut user, "Missing", "  ").unwrap_err(),
            LedgerError::EmptyCategory
        );
    }

    #[test]
    fn remove_category_deletes_and_recomputes() {
        let mut user = user();
        LedgerService::record_income(&mut user, "Salary", 1000.0, "2026-01-01", "").unwrap();
        LedgerService::record_expense(&mut user, "Food", 200.0, "2026-01-02", "").unwrap();
        LedgerService::set_budget(&mut user, "Food", 300.0).unwrap();

        LedgerService::remove_category(&mut user, "food").unwrap();
        assert_eq!(user.wallet.transactions.len(), 1);
        assert_eq!(user.wallet.balance, 1000.0);
        assert!(user.wallet.budgets.is_empty());
    }

    #[test]
    fn remove_category_fails_when_missing() {
        let mut user = user();
        assert!(matches!(
            LedgerService::remove_category(&mut user, "Missing"),
            Err(LedgerError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn transfer_requires_known_parties() {
        let mut users = BTreeMap::new();
        users.insert("alice".to_string(), User::new("alice", "hash"));
        let err = LedgerService::transfer(&mut users, "alice", "bob", 10.0, "", "")
            .expect_err("unknown receiver must fail");
        assert_eq!(err, LedgerError::UnknownTransferParty);
        assert!(users["alice"].wallet.transactions.is_empty());
    }

    #[test]
    fn failed_transfer_leaves_both_wallets_untouched() {
        let mut users = BTreeMap::new();
        users.insert("alice".to_string(), User::new("alice", "hash"));
        users.insert("bob".to_string(), User::new("bob", "hash"));
        let err = LedgerService::transfer(&mut users, "alice", "bob", 100.0, "2026-01-01", "")
            .expect_err("insufficient funds must fail");
        assert_eq!(err, LedgerError::InsufficientFunds);
        assert_eq!(users["alice"].wallet.balance, 0.0);
        assert_eq!(users["bob"].wallet.balance, 0.0);
        assert!(users["alice"].wallet.transactions.is_empty());
        assert!(users["bob"].wallet.transactions.is_empty());
    }
}
