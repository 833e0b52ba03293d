pub mod ledger_manager;
pub mod notice;
pub mod registry;
pub mod repository;
pub mod services;

pub use ledger_manager::{ImportSummary, LedgerManager};
pub use notice::{BudgetAlert, LedgerNotice, PostingReport};
pub use registry::{CategoryRegistry, InMemoryCategoryRegistry};
pub use repository::{InMemoryUserRepository, UserRepository};
