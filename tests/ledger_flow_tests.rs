use std::collections::BTreeMap;

use finance_core::core::services::{LedgerService, ReportService};
use finance_core::domain::{ReportFilter, TransactionKind, User};
use finance_core::errors::LedgerError;

fn approx(left: f64, right: f64) {
    assert!(
        (left - right).abs() < 1e-9,
        "expected {right}, got {left}"
    );
}

fn assert_balance_invariant(user: &User) {
    approx(
        user.wallet.balance,
        user.wallet.inflow_total() - user.wallet.outflow_total(),
    );
}

#[test]
fn income_scenario_updates_balance_and_report() {
    let mut user = User::new("u", "hash");
    let outcome =
        LedgerService::record_income(&mut user, "Salary", 1000.0, "2026-01-01", "ok").unwrap();
    assert_eq!(outcome.value.kind, TransactionKind::Income);
    approx(user.wallet.balance, 1000.0);
    assert_balance_invariant(&user);

    let report = ReportService::build(&user.wallet, &ReportFilter::default(), Vec::new());
    assert_eq!(report.data.income_by_category.len(), 1);
    assert_eq!(report.data.income_by_category[0].category, "Salary");
    approx(report.data.income_by_category[0].total, 1000.0);
}

#[test]
fn overdraft_expense_fails_and_leaves_wallet_untouched() {
    let mut user = User::new("u", "hash");
    LedgerService::record_income(&mut user, "Salary", 1000.0, "2026-01-01", "").unwrap();

    let err = LedgerService::record_expense(&mut user, "Food", 1500.0, "2026-01-02", "")
        .expect_err("overdraft must fail");
    assert_eq!(err, LedgerError::InsufficientFunds);
    approx(user.wallet.balance, 1000.0);
    assert_eq!(user.wallet.transactions.len(), 1);
    assert_balance_invariant(&user);
}

#[test]
fn transfer_moves_funds_and_links_counterparties() {
    let mut users = BTreeMap::new();
    users.insert("alice".to_string(), User::new("Alice", "hash"));
    users.insert("bob".to_string(), User::new("Bob", "hash"));
    LedgerService::record_income(
        users.get_mut("alice").unwrap(),
        "Salary",
        1000.0,
        "2026-01-01",
        "",
    )
    .unwrap();

    LedgerService::transfer(&mut users, "Alice", "BOB", 400.0, "2026-01-02", "rent share")
        .unwrap();

    let sender = &users["alice"];
    let receiver = &users["bob"];
    approx(sender.wallet.balance, 600.0);
    approx(receiver.wallet.balance, 400.0);
    assert_balance_invariant(sender);
    assert_balance_invariant(receiver);

    assert_eq!(receiver.wallet.transactions.len(), 1);
    let incoming = &receiver.wallet.transactions[0];
    assert_eq!(incoming.kind, TransactionKind::TransferIn);
    assert_eq!(incoming.counterparty.as_deref(), Some("Alice"));
    assert_eq!(incoming.date, "2026-01-02");

    let outgoing = sender
        .wallet
        .transactions
        .iter()
        .find(|txn| txn.kind == TransactionKind::TransferOut)
        .expect("outgoing leg recorded");
    assert_eq!(outgoing.counterparty.as_deref(), Some("Bob"));
    assert_eq!(outgoing.date, incoming.date);
    assert_ne!(outgoing.id, incoming.id);
}

#[test]
fn category_casing_is_unified_across_operations() {
    let mut user = User::new("u", "hash");
    LedgerService::record_income(&mut user, "Food", 100.0, "2026-01-01", "").unwrap();
    LedgerService::record_expense(&mut user, "food", 20.0, "2026-01-02", "").unwrap();
    LedgerService::record_expense(&mut user, "FOOD", 30.0, "2026-01-03", "").unwrap();

    let categories = ReportService::list_categories(&user.wallet);
    assert_eq!(categories, vec!["Food".to_string()]);

    let report = ReportService::build(&user.wallet, &ReportFilter::default(), Vec::new());
    assert_eq!(report.data.expense_by_category.len(), 1);
    approx(report.data.expense_by_category[0].total, 50.0);
}

#[test]
fn rename_category_moves_everything_under_the_new_name() {
    let mut user = User::new("u", "hash");
    LedgerService::record_income(&mut user, "Food", 1000.0, "2026-01-01", "").unwrap();
    LedgerService::record_expense(&mut user, "food", 100.0, "2026-01-02", "").unwrap();
    LedgerService::set_budget(&mut user, "Food", 500.0).unwrap();
    let count_before = user.wallet.transactions.len();

    LedgerService::rename_category(&mut user, "FOOD", "Meals").unwrap();

    assert_eq!(user.wallet.transactions.len(), count_before);
    let categories = ReportService::list_categories(&user.wallet);
    assert_eq!(categories, vec!["Meals".to_string()]);
    assert!(!categories
        .iter()
        .any(|name| name.eq_ignore_ascii_case("food")));
    assert_eq!(user.wallet.budgets.get("Meals"), Some(&500.0));
    assert_balance_invariant(&user);
}

#[test]
fn remove_category_shrinks_history_and_recomputes_balance() {
    let mut user = User::new("u", "hash");
    LedgerService::record_income(&mut user, "Salary", 1000.0, "2026-01-01", "").unwrap();
    LedgerService::record_expense(&mut user, "Food", 200.0, "2026-01-02", "").unwrap();
    LedgerService::record_expense(&mut user, "food", 100.0, "2026-01-03", "").unwrap();
    LedgerService::set_budget(&mut user, "Food", 300.0).unwrap();

    LedgerService::remove_category(&mut user, "Food").unwrap();

    assert_eq!(user.wallet.transactions.len(), 1);
    approx(user.wallet.balance, 1000.0);
    assert!(user.wallet.budgets.is_empty());
    assert_balance_invariant(&user);
}

#[test]
fn budget_remaining_reflects_recorded_spend() {
    let mut user = User::new("u", "hash");
    LedgerService::record_income(&mut user, "Salary", 1000.0, "2026-01-01", "").unwrap();
    LedgerService::set_budget(&mut user, "Food", 500.0).unwrap();
    LedgerService::record_expense(&mut user, "Food", 200.0, "2026-01-02", "").unwrap();

    let report = ReportService::build(&user.wallet, &ReportFilter::default(), Vec::new());
    let status = report
        .data
        .budgets
        .iter()
        .find(|status| status.category == "Food")
        .expect("budget status present");
    approx(status.remaining, 300.0);
}

#[test]
fn balance_invariant_holds_over_a_mixed_operation_sequence() {
    let mut users = BTreeMap::new();
    users.insert("a".to_string(), User::new("a", "hash"));
    users.insert("b".to_string(), User::new("b", "hash"));

    let a = users.get_mut("a").unwrap();
    LedgerService::record_income(a, "Salary", 2500.0, "2026-01-01", "").unwrap();
    LedgerService::record_expense(a, "Rent", 900.0, "2026-01-02", "").unwrap();
    LedgerService::record_expense(a, "Food", 120.5, "2026-01-03", "").unwrap();
    LedgerService::set_budget(a, "Food", 400.0).unwrap();
    LedgerService::transfer(&mut users, "a", "b", 300.0, "2026-01-04", "").unwrap();
    LedgerService::rename_category(users.get_mut("a").unwrap(), "Rent", "Housing").unwrap();
    LedgerService::remove_category(users.get_mut("a").unwrap(), "Food").unwrap();

    for user in users.values() {
        assert_balance_invariant(user);
        assert!(user.wallet.balance >= 0.0);
    }
}
