pub mod csv_format;
pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{errors::Result, ledger::Wallet};

/// Abstraction over persistence backends for wallet snapshots and CSV reports.
pub trait WalletStore: Send + Sync {
    fn save(&self, wallet: &Wallet) -> Result<()>;

    /// Loads the stored wallet for `login`, or an empty wallet when none exists.
    fn load(&self, login: &str) -> Result<Wallet>;

    /// Writes the wallet's transactions as CSV and returns the file path.
    fn export_csv(&self, wallet: &Wallet) -> Result<PathBuf>;

    /// Parses a CSV transaction file; bad rows come back as skips, not errors.
    fn import_csv(&self, path: &Path) -> Result<Vec<csv_format::CsvRow>>;
}

pub use csv_format::{CsvRecord, CsvRow, CSV_HEADER};
pub use json_backend::JsonWalletStore;
