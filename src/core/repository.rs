//! User lookup injected into the ledger facade.

use std::collections::HashMap;

use crate::errors::{LedgerError, Result};
use crate::ledger::{User, Wallet};

/// Stores users keyed by their case-sensitive login.
pub trait UserRepository: Send + Sync {
    fn find(&self, login: &str) -> Option<&User>;
    fn find_mut(&mut self, login: &str) -> Option<&mut User>;
    fn insert(&mut self, user: User);

    fn contains(&self, login: &str) -> bool {
        self.find(login).is_some()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: HashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find(&self, login: &str) -> Option<&User> {
        self.users.get(login)
    }

    fn find_mut(&mut self, login: &str) -> Option<&mut User> {
        self.users.get_mut(login)
    }

    fn insert(&mut self, user: User) {
        self.users.insert(user.login().to_string(), user);
    }
}

/// Resolves the wallet owned by `login`.
pub fn wallet_of<'a>(users: &'a dyn UserRepository, login: &str) -> Result<&'a Wallet> {
    users
        .find(login)
        .map(User::wallet)
        .ok_or_else(|| LedgerError::WalletNotFound(login.to_string()))
}

/// Mutable variant of [`wallet_of`].
pub fn wallet_of_mut<'a>(users: &'a mut dyn UserRepository, login: &str) -> Result<&'a mut Wallet> {
    users
        .find_mut(login)
        .map(User::wallet_mut)
        .ok_or_else(|| LedgerError::WalletNotFound(login.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logins_are_case_sensitive() {
        let mut users = InMemoryUserRepository::new();
        users.insert(User::new("alice", "hash"));

        assert!(users.contains("alice"));
        assert!(!users.contains("Alice"));
    }

    #[test]
    fn missing_wallet_is_not_found() {
        let mut users = InMemoryUserRepository::new();
        let err = wallet_of_mut(&mut users, "ghost").unwrap_err();
        assert!(matches!(err, LedgerError::WalletNotFound(ref login) if login == "ghost"));
    }

    #[test]
    fn wallet_belongs_to_its_user() {
        let mut users = InMemoryUserRepository::new();
        users.insert(User::new("bob", "hash"));
        assert_eq!(wallet_of(&users, "bob").unwrap().owner_login(), "bob");
    }
}
