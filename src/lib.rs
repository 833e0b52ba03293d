#![doc(test(attr(deny(warnings))))]

//! Finance Core keeps a personal finance wallet consistent: transactions,
//! per-category budgets, and category identity across renames, with JSON
//! snapshots and CSV exchange for persistence.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::config::{Config, ConfigManager};
pub use crate::core::{BudgetAlert, ImportSummary, LedgerManager, LedgerNotice, PostingReport};
pub use crate::errors::{LedgerError, Result};

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    utils::init_tracing();
}

/// Same as [`init`], using the configured log filter when `RUST_LOG` is unset.
///
/// Has no effect once tracing is initialized.
pub fn init_with(config: &Config) {
    utils::init_tracing_with(config.log_filter.as_deref());
}
