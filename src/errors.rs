use std::result::Result as StdResult;

use thiserror::Error;

/// Error type that captures ledger, budget, and persistence failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Budget not found: {0}")]
    BudgetNotFound(String),
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, LedgerError>;

impl LedgerError {
    /// Returns `true` for every variant describing a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::CategoryNotFound(_)
                | LedgerError::BudgetNotFound(_)
                | LedgerError::WalletNotFound(_)
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::StorageError(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        LedgerError::StorageError(err.to_string())
    }
}

/// Rejects amounts that are not finite and strictly positive.
pub(crate) fn ensure_positive(amount: f64, what: &str) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput(format!(
            "{what} must be a positive number, got {amount}"
        )))
    }
}
