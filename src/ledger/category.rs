use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// Groups transactions and budgets under a case-insensitive name.
///
/// The display name keeps the casing it was created with. Every map keyed by
/// category uses [`Category::key`], never the display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    name: String,
}

impl Category {
    /// Builds a category from user input, trimming surrounding whitespace.
    ///
    /// Names end up as a bare CSV field, so commas and control characters
    /// such as line breaks are refused.
    pub fn new(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::InvalidInput(
                "Category name cannot be empty".into(),
            ));
        }
        if trimmed.contains(|c: char| c == ',' || c.is_control()) {
            return Err(LedgerError::InvalidInput(format!(
                "Category name {trimmed:?} cannot contain commas or line breaks"
            )));
        }
        Ok(Self {
            name: trimmed.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized lookup key.
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }

    /// Returns `true` when `name` refers to this category, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.key() == normalize_key(name)
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Category {}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Lowercased, trimmed form of a category name used as a map key.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_and_keeps_casing() {
        let category = Category::new("  Groceries ").unwrap();
        assert_eq!(category.name(), "Groceries");
        assert_eq!(category.key(), "groceries");
    }

    #[test]
    fn blank_names_are_rejected() {
        let err = Category::new("   ").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }

    #[test]
    fn names_unfit_for_csv_are_rejected() {
        for name in ["Food, drinks", "Food\nDrinks", "Tab\there"] {
            assert!(
                matches!(Category::new(name), Err(LedgerError::InvalidInput(_))),
                "name: {name:?}"
            );
        }
        assert_eq!(Category::new("Food & drinks").unwrap().name(), "Food & drinks");
    }

    #[test]
    fn equality_ignores_case() {
        let a = Category::new("Food").unwrap();
        let b = Category::new("fOOD").unwrap();
        assert_eq!(a, b);
        assert!(a.matches(" food "));
        assert_ne!(a, Category::new("Rent").unwrap());
    }
}
