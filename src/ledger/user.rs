use super::wallet::Wallet;

/// An account holder. Owns exactly one wallet for the lifetime of the account.
#[derive(Debug, Clone)]
pub struct User {
    login: String,
    password_hash: String,
    wallet: Wallet,
}

impl User {
    /// Creates a user with an empty wallet. `password_hash` is an encoded PHC string.
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            wallet: Wallet::new(login.clone()),
            login,
            password_hash: password_hash.into(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn wallet_mut(&mut self) -> &mut Wallet {
        &mut self.wallet
    }

    /// Swaps in a wallet rehydrated from storage.
    pub fn attach_wallet(&mut self, wallet: Wallet) {
        self.wallet = wallet;
    }
}
