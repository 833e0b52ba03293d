#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use finance_core::{
    config::ConfigManager, core::ledger_manager::LedgerManager,
    storage::json_backend::JsonWalletStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

pub const LOGIN: &str = "alice";
pub const PASSWORD: &str = "correct horse";

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn wallet_dir(base: &std::path::Path) -> PathBuf {
    base.join("wallets")
}

/// Creates isolated managers backed by unique directories for each test.
pub fn setup_test_env() -> (LedgerManager, ConfigManager, PathBuf) {
    let base = temp_base();
    let ledger_manager = manager_at(&base);
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (ledger_manager, config_manager, base)
}

/// A fresh manager over the snapshots stored under `base`.
pub fn manager_at(base: &std::path::Path) -> LedgerManager {
    let storage = JsonWalletStore::new(wallet_dir(base)).expect("create json wallet store");
    LedgerManager::with_storage(Box::new(storage))
}

/// A manager with `alice` already registered.
pub fn signed_up_manager() -> (LedgerManager, PathBuf) {
    let (mut manager, _, base) = setup_test_env();
    manager.sign_up(LOGIN, PASSWORD).expect("sign up");
    (manager, base)
}
