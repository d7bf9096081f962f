//! Registration and login over the user registry.

use std::collections::BTreeMap;

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::domain::user::User;
use crate::domain::wallet::fold_case;
use crate::errors::AuthError;

pub type AuthResult<T> = Result<T, AuthError>;

/// Stateless authentication helpers; the registry itself is owned by the
/// calling session and keyed by lowercased login.
pub struct AuthService;

impl AuthService {
    /// Creates a new user with an argon2-hashed password and returns its
    /// registry key.
    pub fn register(
        users: &mut BTreeMap<String, User>,
        login: &str,
        password: &str,
    ) -> AuthResult<String> {
        let login = login.trim();
        if login.is_empty() {
            return Err(AuthError::EmptyLogin);
        }
        if password.trim().is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        let key = fold_case(login);
        if users.contains_key(&key) {
            return Err(AuthError::DuplicateLogin(login.to_string()));
        }
        let hash = Self::hash_password(password)?;
        users.insert(key.clone(), User::new(login, hash));
        tracing::info!(login, "registered new user");
        Ok(key)
    }

    /// Verifies credentials and returns the registry key on success.
    pub fn login(
        users: &BTreeMap<String, User>,
        login: &str,
        password: &str,
    ) -> AuthResult<String> {
        let login = login.trim();
        if login.is_empty() {
            return Err(AuthError::EmptyLogin);
        }
        if password.trim().is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        let key = fold_case(login);
        let user = users
            .get(&key)
            .ok_or_else(|| AuthError::UnknownUser(login.to_string()))?;
        if !Self::verify_password(password, &user.password_hash) {
            return Err(AuthError::WrongPassword);
        }
        tracing::info!(login, "user logged in");
        Ok(key)
    }

    fn hash_password(password: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| AuthError::Hash(err.to_string()))
    }

    fn verify_password(password: &str, stored_hash: &str) -> bool {
        PasswordHash::new(stored_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
