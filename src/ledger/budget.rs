use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::{normalize_key, Category};
use crate::errors::{ensure_positive, LedgerError, Result};

/// A spending cap and running total for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    category: Category,
    limit: f64,
    spent: f64,
}

impl Budget {
    pub fn new(category: Category, limit: f64) -> Self {
        Self {
            category,
            limit,
            spent: 0.0,
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn spent(&self) -> f64 {
        self.spent
    }

    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }

    fn add_expense(&mut self, amount: f64) {
        self.spent += amount;
    }
}

/// Post-expense state of a budget, handed to threshold evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUsage {
    pub spent: f64,
    pub limit: f64,
}

/// Per-wallet budgets, at most one per category key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BudgetLedger {
    budgets: BTreeMap<String, Budget>,
}

impl BudgetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh budget for `category`, discarding any prior one.
    pub fn set(&mut self, category: Category, limit: f64) -> Result<&Budget> {
        ensure_positive(limit, "Budget limit")?;
        Ok(self.replace(category, limit))
    }

    /// Replaces an existing budget with a new limit and a zero spent total.
    pub fn update(&mut self, category: Category, new_limit: f64) -> Result<&Budget> {
        ensure_positive(new_limit, "Budget limit")?;
        if !self.budgets.contains_key(&category.key()) {
            return Err(LedgerError::BudgetNotFound(category.name().to_string()));
        }
        Ok(self.replace(category, new_limit))
    }

    /// Adds `amount` to the category's budget, if one exists.
    pub fn record_expense(&mut self, category: &Category, amount: f64) -> Option<BudgetUsage> {
        let budget = self.budgets.get_mut(&category.key())?;
        budget.add_expense(amount);
        Some(BudgetUsage {
            spent: budget.spent,
            limit: budget.limit,
        })
    }

    /// Moves the budget filed under `old` to `new`, keeping limit and spent.
    pub fn rekey(&mut self, old: &Category, new: &Category) -> bool {
        match self.budgets.remove(&old.key()) {
            Some(mut budget) => {
                budget.category = new.clone();
                self.budgets.insert(new.key(), budget);
                true
            }
            None => false,
        }
    }

    /// Replaces each budget's category with the value `canonical` returns.
    /// Keys, limits and spent totals are unchanged.
    pub fn canonicalize_categories<F>(&mut self, mut canonical: F) -> Result<()>
    where
        F: FnMut(&Category) -> Result<Category>,
    {
        for budget in self.budgets.values_mut() {
            budget.category = canonical(&budget.category)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Budget> {
        self.budgets.get(&normalize_key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.values()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    fn replace(&mut self, category: Category, limit: f64) -> &Budget {
        let key = category.key();
        self.budgets.insert(key.clone(), Budget::new(category, limit));
        &self.budgets[&key]
    }
}
