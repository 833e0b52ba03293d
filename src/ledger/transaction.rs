use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::errors::LedgerError;

/// Direction of a wallet movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown transaction type `{other}`"
            ))),
        }
    }
}

/// An immutable income or expense record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "type")]
    kind: TransactionType,
    category: Category,
    amount: f64,
    description: String,
    date: NaiveDate,
}

impl Transaction {
    /// Creates a transaction dated today.
    pub fn new(
        kind: TransactionType,
        category: Category,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            category,
            amount,
            description: description.into(),
            date: Local::now().date_naive(),
        }
    }

    /// Overrides the stored date. Only imports need this.
    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Returns a copy filed under `category`, keeping every other field.
    pub fn with_category(&self, category: Category) -> Self {
        Self {
            category,
            description: self.description.clone(),
            ..*self
        }
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food() -> Category {
        Category::new("Food").unwrap()
    }

    #[test]
    fn new_transactions_are_dated_today() {
        let txn = Transaction::new(TransactionType::Expense, food(), 12.5, "lunch");
        assert_eq!(txn.date(), Local::now().date_naive());
        assert!(txn.is_expense());
    }

    #[test]
    fn with_category_preserves_other_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let txn = Transaction::new(TransactionType::Income, food(), 40.0, "refund").dated(date);
        let moved = txn.with_category(Category::new("Dining").unwrap());

        assert_eq!(moved.category().name(), "Dining");
        assert_eq!(moved.kind(), TransactionType::Income);
        assert_eq!(moved.amount(), 40.0);
        assert_eq!(moved.description(), "refund");
        assert_eq!(moved.date(), date);
    }

    #[test]
    fn type_parses_exact_labels_only() {
        assert_eq!("INCOME".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("EXPENSE".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("income".parse::<TransactionType>().is_err());
    }

    #[test]
    fn serializes_type_field_in_upper_case() {
        let txn = Transaction::new(TransactionType::Expense, food(), 1.0, "x");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "EXPENSE");
        assert_eq!(json["category"]["name"], "Food");
    }
}
