pub mod json_backend;

use std::collections::BTreeMap;

use crate::domain::user::User;
use crate::errors::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over persistence backends for the user registry.
///
/// The registry maps lowercased login to user. The core never performs I/O
/// itself; callers invoke `save_all` after each successful mutation.
pub trait UserRepository {
    fn load_all(&self) -> Result<BTreeMap<String, User>>;
    fn save_all(&self, users: &BTreeMap<String, User>) -> Result<()>;
}

pub use json_backend::JsonUserStore;
