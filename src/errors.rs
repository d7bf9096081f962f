use thiserror::Error;

/// Validation failures surfaced by ledger operations.
///
/// Every variant is an expected, recoverable outcome; callers are free to
/// re-prompt. Display strings are the stable user-facing wording.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero.")]
    NonPositiveAmount,
    #[error("Category cannot be empty.")]
    EmptyCategory,
    #[error("Invalid date. Expected format: YYYY-MM-DD.")]
    InvalidDate,
    #[error("Insufficient funds. Balance cannot drop below zero.")]
    InsufficientFunds,
    #[error("Budget limit cannot be negative.")]
    NegativeBudgetLimit,
    #[error("No budget is set for category `{0}`.")]
    BudgetNotFound(String),
    #[error("Category `{0}` was not found.")]
    CategoryNotFound(String),
    #[error("Sender or receiver was not found.")]
    UnknownTransferParty,
}

/// Failures raised by the registration and login flow.
#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("Login cannot be empty.")]
    EmptyLogin,
    #[error("Password cannot be empty.")]
    EmptyPassword,
    #[error("A user with login `{0}` already exists.")]
    DuplicateLogin(String),
    #[error("User `{0}` was not found.")]
    UnknownUser(String),
    #[error("Wrong password.")]
    WrongPassword,
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Errors produced by persistence backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
