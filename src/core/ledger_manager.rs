use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::notice::{PostingReport, DEFAULT_WARNING_RATIO};
use crate::core::registry::{CategoryRegistry, InMemoryCategoryRegistry};
use crate::core::repository::{wallet_of, wallet_of_mut, InMemoryUserRepository, UserRepository};
use crate::core::services::{
    BalanceSummary, BudgetLine, BudgetService, CategoryService, IdentityService, RenameOutcome,
    SummaryService, WalletService,
};
use crate::errors::{LedgerError, Result};
use crate::ledger::{Budget, Category, CategoryMatch, Transaction, Wallet};
use crate::storage::{CsvRow, JsonWalletStore, WalletStore};

/// Counts reported back from a CSV import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Facade that coordinates users, the category registry, and persistence.
///
/// Every wallet mutation is followed by a save. A failed save is reported as
/// [`LedgerError::StorageError`] but the in-memory change is kept.
pub struct LedgerManager {
    registry: Box<dyn CategoryRegistry>,
    users: Box<dyn UserRepository>,
    storage: Box<dyn WalletStore>,
    warning_ratio: f64,
}

impl LedgerManager {
    pub fn new(
        registry: Box<dyn CategoryRegistry>,
        users: Box<dyn UserRepository>,
        storage: Box<dyn WalletStore>,
    ) -> Self {
        Self {
            registry,
            users,
            storage,
            warning_ratio: DEFAULT_WARNING_RATIO,
        }
    }

    /// In-memory registry and users over the given store.
    pub fn with_storage(storage: Box<dyn WalletStore>) -> Self {
        Self::new(
            Box::new(InMemoryCategoryRegistry::new()),
            Box::new(InMemoryUserRepository::new()),
            storage,
        )
    }

    /// Builds a manager backed by JSON snapshots in the configured data directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = JsonWalletStore::new(config.resolved_data_dir())?;
        Self::with_storage(Box::new(store)).with_warning_ratio(config.budget_warning_ratio)
    }

    /// Overrides the share of a budget limit at which "approaching" is signalled.
    pub fn with_warning_ratio(mut self, ratio: f64) -> Result<Self> {
        if !(ratio.is_finite() && ratio > 0.0 && ratio <= 1.0) {
            return Err(LedgerError::InvalidInput(format!(
                "budget warning ratio must be within (0, 1], got {ratio}"
            )));
        }
        self.warning_ratio = ratio;
        Ok(self)
    }

    pub fn warning_ratio(&self) -> f64 {
        self.warning_ratio
    }

    pub fn storage(&self) -> &dyn WalletStore {
        self.storage.as_ref()
    }

    pub fn sign_up(&mut self, login: &str, password: &str) -> Result<()> {
        IdentityService::sign_up(self.users.as_mut(), login, password)
    }

    /// Verifies credentials and, on success, replaces the user's wallet with
    /// the stored snapshot. The snapshot's categories join the registry.
    pub fn sign_in(&mut self, login: &str, password: &str) -> Result<bool> {
        if !IdentityService::sign_in(self.users.as_ref(), login, password)? {
            warn!(login, "sign-in rejected");
            return Ok(false);
        }
        let mut wallet = self.storage.load(login)?;
        CategoryService::adopt_wallet(self.registry.as_mut(), &mut wallet)?;
        if let Some(user) = self.users.find_mut(login) {
            user.attach_wallet(wallet);
        }
        info!(login, "signed in");
        Ok(true)
    }

    pub fn wallet(&self, login: &str) -> Result<&Wallet> {
        wallet_of(self.users.as_ref(), login)
    }

    pub fn add_category(&mut self, name: &str) -> Result<Category> {
        CategoryService::add(self.registry.as_mut(), name)
    }

    pub fn categories(&self) -> Vec<Category> {
        CategoryService::list(self.registry.as_ref())
    }

    pub fn post_income(
        &mut self,
        login: &str,
        amount: f64,
        category_name: &str,
        description: &str,
    ) -> Result<PostingReport> {
        let wallet = wallet_of_mut(self.users.as_mut(), login)?;
        let report = WalletService::post_income(
            self.registry.as_mut(),
            wallet,
            amount,
            category_name,
            description,
        )?;
        self.storage.save(wallet)?;
        Ok(report)
    }

    pub fn post_expense(
        &mut self,
        login: &str,
        amount: f64,
        category_name: &str,
        description: &str,
    ) -> Result<PostingReport> {
        let wallet = wallet_of_mut(self.users.as_mut(), login)?;
        let report = WalletService::post_expense(
            self.registry.as_mut(),
            wallet,
            amount,
            category_name,
            description,
            self.warning_ratio,
        )?;
        self.storage.save(wallet)?;
        Ok(report)
    }

    pub fn set_budget(&mut self, login: &str, category_name: &str, limit: f64) -> Result<Budget> {
        let wallet = wallet_of_mut(self.users.as_mut(), login)?;
        let budget = BudgetService::set(self.registry.as_mut(), wallet, category_name, limit)?;
        self.storage.save(wallet)?;
        Ok(budget)
    }

    pub fn update_budget(
        &mut self,
        login: &str,
        category_name: &str,
        new_limit: f64,
    ) -> Result<Budget> {
        let wallet = wallet_of_mut(self.users.as_mut(), login)?;
        let budget =
            BudgetService::update(self.registry.as_ref(), wallet, category_name, new_limit)?;
        self.storage.save(wallet)?;
        Ok(budget)
    }

    /// Renames a registry category and rewrites `login`'s wallet to match.
    pub fn rename_category(
        &mut self,
        login: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<RenameOutcome> {
        let wallet = wallet_of_mut(self.users.as_mut(), login)?;
        let outcome = CategoryService::rename(self.registry.as_mut(), wallet, old_name, new_name)?;
        self.storage.save(wallet)?;
        Ok(outcome)
    }

    /// Drops the category from the registry. Wallets are left untouched.
    pub fn delete_category(&mut self, name: &str) -> Result<()> {
        CategoryService::remove(self.registry.as_mut(), name)
    }

    pub fn save(&self, login: &str) -> Result<()> {
        self.storage.save(self.wallet(login)?)
    }

    pub fn export_csv(&self, login: &str) -> Result<PathBuf> {
        self.storage.export_csv(self.wallet(login)?)
    }

    /// Appends every well-formed row of `path` to `login`'s wallet.
    ///
    /// Imported expenses do not count against budgets and raise no notices.
    pub fn import_csv(&mut self, login: &str, path: &Path) -> Result<ImportSummary> {
        let wallet = wallet_of_mut(self.users.as_mut(), login)?;
        let rows = self.storage.import_csv(path)?;
        let mut summary = ImportSummary::default();
        for row in rows {
            match row {
                CsvRow::Parsed(record) => {
                    let category = self.registry.resolve(&record.category)?;
                    let transaction =
                        Transaction::new(record.kind, category, record.amount, record.description)
                            .dated(record.date);
                    wallet.transactions.append(transaction);
                    summary.imported += 1;
                }
                CsvRow::Skipped { line, reason } => {
                    warn!(line, %reason, "skipping CSV row");
                    summary.skipped += 1;
                }
            }
        }
        info!(
            login,
            path = %path.display(),
            imported = summary.imported,
            skipped = summary.skipped,
            "transactions imported"
        );
        self.storage.save(wallet)?;
        Ok(summary)
    }

    pub fn balance(&self, login: &str) -> Result<BalanceSummary> {
        Ok(SummaryService::balance(self.wallet(login)?))
    }

    pub fn budget_report(&self, login: &str) -> Result<Vec<BudgetLine>> {
        Ok(SummaryService::budget_report(self.wallet(login)?))
    }

    pub fn transactions_in_period(
        &self,
        login: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<&Transaction>> {
        WalletService::transactions_in_period(self.wallet(login)?, start, end)
    }

    pub fn income_by_categories(
        &self,
        login: &str,
        names: &[&str],
        mode: CategoryMatch,
    ) -> Result<f64> {
        let total = WalletService::income_by_categories(self.wallet(login)?, names, mode);
        debug!(login, total, "income by categories");
        Ok(total)
    }

    pub fn expense_by_categories(
        &self,
        login: &str,
        names: &[&str],
        mode: CategoryMatch,
    ) -> Result<f64> {
        let total = WalletService::expense_by_categories(self.wallet(login)?, names, mode);
        debug!(login, total, "expense by categories");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Store that records saves in memory and can be told to fail.
    #[derive(Default, Clone)]
    struct RecordingStore {
        saved: Arc<Mutex<Vec<Wallet>>>,
        fail: bool,
    }

    impl WalletStore for RecordingStore {
        fn save(&self, wallet: &Wallet) -> Result<()> {
            if self.fail {
                return Err(LedgerError::StorageError("disk full".into()));
            }
            self.saved.lock().unwrap().push(wallet.clone());
            Ok(())
        }

        fn load(&self, login: &str) -> Result<Wallet> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|wallet| wallet.owner_login() == login)
                .cloned()
                .unwrap_or_else(|| Wallet::new(login)))
        }

        fn export_csv(&self, _wallet: &Wallet) -> Result<PathBuf> {
            Err(LedgerError::StorageError("not supported".into()))
        }

        fn import_csv(&self, _path: &Path) -> Result<Vec<CsvRow>> {
            Err(LedgerError::StorageError("not supported".into()))
        }
    }

    fn manager(store: RecordingStore) -> LedgerManager {
        let mut manager = LedgerManager::with_storage(Box::new(store));
        manager.sign_up("alice", "pw").unwrap();
        manager
    }

    #[test]
    fn each_mutation_saves_the_wallet() {
        let store = RecordingStore::default();
        let mut manager = manager(store.clone());

        manager.post_income("alice", 100.0, "Salary", "").unwrap();
        manager.set_budget("alice", "Food", 50.0).unwrap();
        manager.post_expense("alice", 10.0, "Food", "").unwrap();
        manager.update_budget("alice", "food", 60.0).unwrap();
        manager.rename_category("alice", "Food", "Groceries").unwrap();
        manager.delete_category("Salary").unwrap();

        let saved = store.saved.lock().unwrap();
        assert_eq!(saved.len(), 5);
        assert_eq!(saved.last().unwrap(), manager.wallet("alice").unwrap());
    }

    #[test]
    fn failed_save_keeps_the_mutation() {
        let store = RecordingStore {
            fail: true,
            ..RecordingStore::default()
        };
        let mut manager = manager(store);

        let err = manager.post_income("alice", 100.0, "Salary", "").unwrap_err();

        assert!(matches!(err, LedgerError::StorageError(_)));
        assert_eq!(manager.wallet("alice").unwrap().total_income(), 100.0);
    }

    #[test]
    fn unknown_login_has_no_wallet() {
        let mut manager = manager(RecordingStore::default());
        let err = manager.set_budget("bob", "Food", 10.0).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn sign_in_rehydrates_the_stored_wallet() {
        let store = RecordingStore::default();
        let mut stored = Wallet::new("alice");
        stored.transactions.append(Transaction::new(
            crate::ledger::TransactionType::Income,
            Category::new("Gift").unwrap(),
            25.0,
            "",
        ));
        store.saved.lock().unwrap().push(stored.clone());
        let mut manager = manager(store);

        assert!(!manager.sign_in("alice", "nope").unwrap());
        assert!(manager.wallet("alice").unwrap().transactions.is_empty());

        assert!(manager.sign_in("alice", "pw").unwrap());
        assert_eq!(manager.wallet("alice").unwrap(), &stored);
    }

    #[test]
    fn warning_ratio_must_be_a_share() {
        for ratio in [0.0, -0.5, 1.5, f64::NAN] {
            let result = LedgerManager::with_storage(Box::new(RecordingStore::default()))
                .with_warning_ratio(ratio);
            assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
        }
        let manager = LedgerManager::with_storage(Box::new(RecordingStore::default()))
            .with_warning_ratio(1.0)
            .unwrap();
        assert_eq!(manager.warning_ratio(), 1.0);
    }
}
