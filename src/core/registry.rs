//! Canonical category store shared by every wallet.

use std::collections::HashMap;

use crate::errors::{LedgerError, Result};
use crate::ledger::{normalize_key, Category};

/// Resolves category names to one canonical [`Category`] per logical name.
///
/// The registry never touches wallets; propagating renames into transactions
/// and budgets is the caller's job.
pub trait CategoryRegistry: Send + Sync {
    /// Looks up an existing category without creating one.
    fn find(&self, name: &str) -> Option<Category>;

    /// Returns the stored category matching `name`, creating it on first use.
    fn resolve(&mut self, name: &str) -> Result<Category>;

    /// Replaces `old_name` with a brand-new category called `new_name`.
    fn rename(&mut self, old_name: &str, new_name: &str) -> Result<Category>;

    fn delete(&mut self, name: &str) -> Result<()>;

    fn list(&self) -> Vec<Category>;
}

/// Map-backed registry keyed by normalized category name.
#[derive(Debug, Default)]
pub struct InMemoryCategoryRegistry {
    categories: HashMap<String, Category>,
}

impl InMemoryCategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CategoryRegistry for InMemoryCategoryRegistry {
    fn find(&self, name: &str) -> Option<Category> {
        self.categories.get(&normalize_key(name)).cloned()
    }

    fn resolve(&mut self, name: &str) -> Result<Category> {
        let candidate = Category::new(name)?;
        Ok(self
            .categories
            .entry(candidate.key())
            .or_insert(candidate)
            .clone())
    }

    fn rename(&mut self, old_name: &str, new_name: &str) -> Result<Category> {
        let old_key = normalize_key(old_name);
        if !self.categories.contains_key(&old_key) {
            return Err(LedgerError::CategoryNotFound(old_name.trim().to_string()));
        }
        let renamed = Category::new(new_name)?;
        if renamed.key() != old_key && self.categories.contains_key(&renamed.key()) {
            return Err(LedgerError::InvalidInput(format!(
                "Category `{}` already exists",
                renamed.name()
            )));
        }
        self.categories.remove(&old_key);
        self.categories.insert(renamed.key(), renamed.clone());
        Ok(renamed)
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.categories
            .remove(&normalize_key(name))
            .map(|_| ())
            .ok_or_else(|| LedgerError::CategoryNotFound(name.trim().to_string()))
    }

    fn list(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.categories.values().cloned().collect();
        categories.sort_by_key(Category::key);
        categories
    }
}
