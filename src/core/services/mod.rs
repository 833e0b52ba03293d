pub mod budget_service;
pub mod category_service;
pub mod identity_service;
pub mod summary_service;
pub mod wallet_service;

pub use budget_service::BudgetService;
pub use category_service::{CategoryService, RenameOutcome};
pub use identity_service::IdentityService;
pub use summary_service::{BalanceSummary, BudgetLine, SummaryService};
pub use wallet_service::WalletService;
