use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use super::{csv_format, WalletStore};
use crate::{
    errors::{LedgerError, Result},
    ledger::Wallet,
    utils::write_atomic,
};

const SNAPSHOT_EXTENSION: &str = "json";
const REPORT_SUFFIX: &str = "_report.csv";

/// Filesystem-backed JSON snapshots, one file per login.
#[derive(Debug, Clone)]
pub struct JsonWalletStore {
    data_dir: PathBuf,
}

impl JsonWalletStore {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn wallet_path(&self, login: &str) -> Result<PathBuf> {
        let stem = file_stem(login)?;
        Ok(self
            .data_dir
            .join(format!("{stem}.{SNAPSHOT_EXTENSION}")))
    }

    pub fn report_path(&self, login: &str) -> Result<PathBuf> {
        let stem = file_stem(login)?;
        Ok(self.data_dir.join(format!("{stem}{REPORT_SUFFIX}")))
    }
}

impl WalletStore for JsonWalletStore {
    fn save(&self, wallet: &Wallet) -> Result<()> {
        let path = self.wallet_path(wallet.owner_login())?;
        let json = serde_json::to_string_pretty(wallet)?;
        write_atomic(&path, &json)?;
        debug!(path = %path.display(), "wallet saved");
        Ok(())
    }

    fn load(&self, login: &str) -> Result<Wallet> {
        let path = self.wallet_path(login)?;
        if !path.exists() {
            debug!(login, "no stored wallet, starting empty");
            return Ok(Wallet::new(login));
        }
        let data = fs::read_to_string(&path)?;
        let mut wallet: Wallet = serde_json::from_str(&data)?;
        if wallet.owner_login() != login {
            warn!(
                login,
                stored = wallet.owner_login(),
                "snapshot owner differs from login, reassigning"
            );
            wallet.set_owner(login);
        }
        Ok(wallet)
    }

    fn export_csv(&self, wallet: &Wallet) -> Result<PathBuf> {
        let path = self.report_path(wallet.owner_login())?;
        let file = File::create(&path)?;
        csv_format::write_transactions(BufWriter::new(file), wallet.transactions.as_slice())?;
        info!(
            path = %path.display(),
            rows = wallet.transactions.len(),
            "transactions exported"
        );
        Ok(path)
    }

    fn import_csv(&self, path: &Path) -> Result<Vec<csv_format::CsvRow>> {
        let file = File::open(path)?;
        csv_format::read_transactions(BufReader::new(file))
    }
}

/// Logins map straight to file names, so anything that could escape the data
/// directory is refused.
fn file_stem(login: &str) -> Result<&str> {
    let invalid = login.is_empty()
        || login == "."
        || login == ".."
        || login.contains(['/', '\\', '\0']);
    if invalid {
        Err(LedgerError::InvalidInput(format!(
            "login `{login}` cannot be used as a file name"
        )))
    } else {
        Ok(login)
    }
}
