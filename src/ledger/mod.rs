//! Wallet domain models, persistence-friendly types, and helpers.

pub mod budget;
pub mod category;
pub mod transaction;
pub mod transaction_log;
pub mod user;
pub mod wallet;

pub use budget::{Budget, BudgetLedger, BudgetUsage};
pub use category::{normalize_key, Category};
pub use transaction::{Transaction, TransactionType};
pub use transaction_log::{CategoryFilter, CategoryMatch, TransactionLog};
pub use user::User;
pub use wallet::Wallet;
