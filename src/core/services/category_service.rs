//! Business logic helpers for category management.

use tracing::{debug, info};

use crate::core::registry::CategoryRegistry;
use crate::errors::{LedgerError, Result};
use crate::ledger::{Category, Wallet};

/// What a rename changed inside the wallet it was applied to.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameOutcome {
    pub category: Category,
    pub rewritten_transactions: usize,
    pub budget_moved: bool,
}

/// Keeps registry entries, transactions, and budgets agreeing on category identity.
pub struct CategoryService;

impl CategoryService {
    /// Returns the canonical category for `name`, creating it if necessary.
    pub fn add(registry: &mut dyn CategoryRegistry, name: &str) -> Result<Category> {
        registry.resolve(name)
    }

    /// Renames a category and carries the new name into `wallet`.
    ///
    /// Transactions filed under the old category are rewritten in place and a
    /// budget keyed by the old category moves to the new key unchanged.
    pub fn rename(
        registry: &mut dyn CategoryRegistry,
        wallet: &mut Wallet,
        old_name: &str,
        new_name: &str,
    ) -> Result<RenameOutcome> {
        let old = registry
            .find(old_name)
            .ok_or_else(|| LedgerError::CategoryNotFound(old_name.trim().to_string()))?;
        if new_name.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "New category name cannot be empty".into(),
            ));
        }
        let renamed = registry.rename(old.name(), new_name)?;
        let rewritten_transactions = wallet.transactions.rename_category(&old, &renamed);
        let budget_moved = wallet.budgets.rekey(&old, &renamed);
        info!(
            from = old.name(),
            to = renamed.name(),
            rewritten_transactions,
            budget_moved,
            "category renamed"
        );
        Ok(RenameOutcome {
            category: renamed,
            rewritten_transactions,
            budget_moved,
        })
    }

    /// Registers every category `wallet` refers to and files its transactions
    /// and budgets under the registry's values.
    ///
    /// Needed whenever a wallet comes from storage, since the registry does
    /// not outlive the session. Returns the number of rewritten transactions.
    pub fn adopt_wallet(registry: &mut dyn CategoryRegistry, wallet: &mut Wallet) -> Result<usize> {
        let rewritten = wallet
            .transactions
            .canonicalize_categories(|category| registry.resolve(category.name()))?;
        wallet
            .budgets
            .canonicalize_categories(|category| registry.resolve(category.name()))?;
        debug!(
            owner = wallet.owner_login(),
            rewritten,
            "wallet categories registered"
        );
        Ok(rewritten)
    }

    /// Removes a category from the registry only.
    ///
    /// Wallets keep their transactions and budgets under the deleted name.
    pub fn remove(registry: &mut dyn CategoryRegistry, name: &str) -> Result<()> {
        registry.delete(name)?;
        info!(category = name.trim(), "category deleted");
        Ok(())
    }

    pub fn list(registry: &dyn CategoryRegistry) -> Vec<Category> {
        registry.list()
    }
}
