use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    category::{normalize_key, Category},
    transaction::{Transaction, TransactionType},
};
use crate::errors::{LedgerError, Result};

/// How a list of category names is compared against stored transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryMatch {
    /// Case-sensitive comparison with the stored display name.
    #[default]
    Exact,
    /// Comparison by normalized key, like every other category lookup.
    IgnoreCase,
}

/// A set of category names plus the comparison rule applied to them.
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    names: Vec<String>,
    mode: CategoryMatch,
}

impl CategoryFilter {
    pub fn new<I, S>(names: I, mode: CategoryMatch) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into);
        let names = match mode {
            CategoryMatch::Exact => names.collect(),
            CategoryMatch::IgnoreCase => names.map(|name| normalize_key(&name)).collect(),
        };
        Self { names, mode }
    }

    pub fn accepts(&self, category: &Category) -> bool {
        match self.mode {
            CategoryMatch::Exact => self.names.iter().any(|name| name == category.name()),
            CategoryMatch::IgnoreCase => {
                let key = category.key();
                self.names.iter().any(|name| *name == key)
            }
        }
    }
}

/// Ordered record of a wallet's transactions, in entry order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, transaction: Transaction) {
        self.entries.push(transaction);
    }

    /// Returns matching transactions in log order.
    pub fn query<P>(&self, predicate: P) -> Vec<&Transaction>
    where
        P: Fn(&Transaction) -> bool,
    {
        self.entries.iter().filter(|txn| predicate(txn)).collect()
    }

    /// Transactions dated within `start..=end`.
    pub fn in_period(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<&Transaction>> {
        if end < start {
            return Err(LedgerError::InvalidInput(format!(
                "period end {end} is before start {start}"
            )));
        }
        Ok(self.query(|txn| txn.date() >= start && txn.date() <= end))
    }

    pub fn in_categories(&self, filter: &CategoryFilter) -> Vec<&Transaction> {
        self.query(|txn| filter.accepts(txn.category()))
    }

    /// Re-files every entry whose category name equals `old`'s name under `new`.
    ///
    /// Entries that do not match are left untouched. Returns the number of
    /// rewritten entries.
    pub fn rename_category(&mut self, old: &Category, new: &Category) -> usize {
        let mut rewritten = 0;
        for entry in self.entries.iter_mut() {
            if entry.category().name() == old.name() {
                *entry = entry.with_category(new.clone());
                rewritten += 1;
            }
        }
        rewritten
    }

    /// Re-files every entry under the category `canonical` returns for it.
    ///
    /// Entries whose stored name already matches are kept as they are.
    pub fn canonicalize_categories<F>(&mut self, mut canonical: F) -> Result<usize>
    where
        F: FnMut(&Category) -> Result<Category>,
    {
        let mut rewritten = 0;
        for entry in self.entries.iter_mut() {
            let category = canonical(entry.category())?;
            if category.name() != entry.category().name() {
                *entry = entry.with_category(category);
                rewritten += 1;
            }
        }
        Ok(rewritten)
    }

    /// Sum of amounts for `kind`, optionally restricted by `filter`.
    pub fn sum_by(&self, kind: TransactionType, filter: Option<&CategoryFilter>) -> f64 {
        self.entries
            .iter()
            .filter(|txn| txn.kind() == kind)
            .filter(|txn| filter.map_or(true, |f| f.accepts(txn.category())))
            .map(Transaction::amount)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
