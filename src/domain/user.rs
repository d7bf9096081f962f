use serde::{Deserialize, Serialize};

use super::wallet::Wallet;

/// An authenticated account owning exactly one wallet for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub password_hash: String,
    #[serde(default)]
    pub wallet: Wallet,
}

impl User {
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password_hash: password_hash.into(),
            wallet: Wallet::new(),
        }
    }

    /// Registry key for this user: logins are identified case-insensitively.
    pub fn key(&self) -> String {
        super::wallet::fold_case(&self.login)
    }
}
