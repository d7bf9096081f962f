//! Wallet domain models and derived report types.

pub mod report;
pub mod transaction;
pub mod user;
pub mod wallet;

pub use report::{BudgetStatus, CategoryTotal, Report, ReportData, ReportFilter};
pub use transaction::{Transaction, TransactionKind};
pub use user::User;
pub use wallet::Wallet;
