//! Budget assignment for a wallet's categories.

use tracing::debug;

use crate::core::registry::CategoryRegistry;
use crate::errors::{ensure_positive, Result};
use crate::ledger::{Budget, Category, Wallet};

/// Validated budget operations over a [`Wallet`]'s budget ledger.
pub struct BudgetService;

impl BudgetService {
    /// Starts a new budget period for the category, creating the category if needed.
    pub fn set(
        registry: &mut dyn CategoryRegistry,
        wallet: &mut Wallet,
        category_name: &str,
        limit: f64,
    ) -> Result<Budget> {
        ensure_positive(limit, "Budget limit")?;
        let category = registry.resolve(category_name)?;
        let budget = wallet.budgets.set(category, limit)?.clone();
        debug!(
            owner = wallet.owner_login(),
            category = budget.category().name(),
            limit,
            "budget set"
        );
        Ok(budget)
    }

    /// Changes the limit of an existing budget and resets its spent total.
    pub fn update(
        registry: &dyn CategoryRegistry,
        wallet: &mut Wallet,
        category_name: &str,
        new_limit: f64,
    ) -> Result<Budget> {
        ensure_positive(new_limit, "Budget limit")?;
        let category = match registry.find(category_name) {
            Some(category) => category,
            None => Category::new(category_name)?,
        };
        let budget = wallet.budgets.update(category, new_limit)?.clone();
        debug!(
            owner = wallet.owner_login(),
            category = budget.category().name(),
            new_limit,
            "budget updated"
        );
        Ok(budget)
    }
}
