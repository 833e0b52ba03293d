use serde::{Deserialize, Serialize};

use super::{
    budget::{Budget, BudgetLedger},
    transaction::TransactionType,
    transaction_log::TransactionLog,
};

/// One user's transactions and budgets.
///
/// The owner is referenced by login only; the snapshot written to disk carries
/// it as a flat `ownerLogin` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    owner_login: String,
    #[serde(default)]
    pub transactions: TransactionLog,
    #[serde(default)]
    pub budgets: BudgetLedger,
}

impl Wallet {
    /// Creates an empty wallet for `owner_login`.
    pub fn new(owner_login: impl Into<String>) -> Self {
        Self {
            owner_login: owner_login.into(),
            transactions: TransactionLog::new(),
            budgets: BudgetLedger::new(),
        }
    }

    pub fn owner_login(&self) -> &str {
        &self.owner_login
    }

    pub(crate) fn set_owner(&mut self, login: &str) {
        self.owner_login = login.to_string();
    }

    pub fn total_income(&self) -> f64 {
        self.transactions.sum_by(TransactionType::Income, None)
    }

    pub fn total_expense(&self) -> f64 {
        self.transactions.sum_by(TransactionType::Expense, None)
    }

    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expense()
    }

    pub fn budgets_view(&self) -> Vec<&Budget> {
        self.budgets.iter().collect()
    }
}
