//! Account registration and credential checks.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::info;

use crate::core::repository::UserRepository;
use crate::errors::{LedgerError, Result};
use crate::ledger::User;

/// Creates users and verifies their passwords. The ledger never sees raw passwords.
pub struct IdentityService;

impl IdentityService {
    /// Registers `login` with an empty wallet.
    pub fn sign_up(users: &mut dyn UserRepository, login: &str, password: &str) -> Result<()> {
        if login.trim().is_empty() {
            return Err(LedgerError::InvalidInput("Login cannot be empty".into()));
        }
        if password.is_empty() {
            return Err(LedgerError::InvalidInput("Password cannot be empty".into()));
        }
        if users.contains(login) {
            return Err(LedgerError::UserAlreadyExists(login.to_string()));
        }
        let hash = hash_password(password)?;
        users.insert(User::new(login, hash));
        info!(login, "user registered");
        Ok(())
    }

    /// Returns `true` only for a known login with a matching password.
    pub fn sign_in(users: &dyn UserRepository, login: &str, password: &str) -> Result<bool> {
        let Some(user) = users.find(login) else {
            return Ok(false);
        };
        verify_password(password, user.password_hash())
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| LedgerError::InvalidInput(format!("password hashing failed: {err}")))
}

fn verify_password(password: &str, encoded: &str) -> Result<bool> {
    let parsed = PasswordHash::new(encoded)
        .map_err(|err| LedgerError::StorageError(format!("corrupt password hash: {err}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(LedgerError::StorageError(format!(
            "password verification failed: {err}"
        ))),
    }
}
