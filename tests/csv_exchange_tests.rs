mod common;

use std::fs;

use chrono::NaiveDate;
use common::{signed_up_manager, temp_base, LOGIN};
use finance_core::{
    ledger::TransactionType, storage::CSV_HEADER, ImportSummary, LedgerError,
};

fn tuples(
    manager: &finance_core::LedgerManager,
    login: &str,
) -> Vec<(TransactionType, String, f64, String, NaiveDate)> {
    manager
        .wallet(login)
        .unwrap()
        .transactions
        .iter()
        .map(|txn| {
            (
                txn.kind(),
                txn.category().name().to_string(),
                txn.amount(),
                txn.description().to_string(),
                txn.date(),
            )
        })
        .collect()
}

#[test]
fn export_then_import_into_empty_wallet_reproduces_transactions() {
    let (mut manager, _) = signed_up_manager();
    manager.post_income(LOGIN, 1000.0, "Salary", "pay").unwrap();
    manager.post_expense(LOGIN, 12.34, "Food", "lunch").unwrap();
    manager.post_expense(LOGIN, 3.0, "Taxi", "").unwrap();

    let path = manager.export_csv(LOGIN).unwrap();
    assert!(path.ends_with(format!("{LOGIN}_report.csv")));
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(CSV_HEADER));
    assert!(text.contains("EXPENSE,Food,12.34,lunch,"));

    manager.sign_up("bob", "pw").unwrap();
    let summary = manager.import_csv("bob", &path).unwrap();

    assert_eq!(
        summary,
        ImportSummary {
            imported: 3,
            skipped: 0
        }
    );
    assert_eq!(tuples(&manager, "bob"), tuples(&manager, LOGIN));
}

#[test]
fn description_commas_survive_the_round_trip() {
    let (mut manager, _) = signed_up_manager();
    manager
        .post_expense(LOGIN, 8.0, "Food", "bread, milk, eggs")
        .unwrap();

    let path = manager.export_csv(LOGIN).unwrap();
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("bread; milk; eggs"));

    manager.sign_up("bob", "pw").unwrap();
    manager.import_csv("bob", &path).unwrap();
    let wallet = manager.wallet("bob").unwrap();
    assert_eq!(
        wallet.transactions.as_slice()[0].description(),
        "bread, milk, eggs"
    );
}

#[test]
fn import_keeps_csv_dates_skips_bad_rows_and_leaves_budgets_alone() {
    let (mut manager, _) = signed_up_manager();
    manager.add_category("Food").unwrap();
    manager.set_budget(LOGIN, "Food", 50.0).unwrap();
    let path = temp_base().join("history.csv");
    fs::write(
        &path,
        "Type,Category,Amount,Description,Date\n\
         EXPENSE,food,40.00,market,2023-05-01\n\
         EXPENSE,Food,not-a-number,broken,2023-05-02\n\
         REFUND,Food,1.00,unknown type,2023-05-03\n\
         INCOME,Salary,500.00,may,2023-05-31\n\
         EXPENSE,Food,2.00,too,many,2023-06-01\n",
    )
    .unwrap();

    let summary = manager.import_csv(LOGIN, &path).unwrap();

    assert_eq!(
        summary,
        ImportSummary {
            imported: 2,
            skipped: 3
        }
    );
    let wallet = manager.wallet(LOGIN).unwrap();
    let first = &wallet.transactions.as_slice()[0];
    assert_eq!(first.category().name(), "Food");
    assert_eq!(first.date(), NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());
    assert_eq!(wallet.budgets.get("Food").unwrap().spent(), 0.0);
    assert_eq!(wallet.balance(), 460.0);
}

#[test]
fn wrong_header_rejects_the_whole_file() {
    let (mut manager, _) = signed_up_manager();
    let path = temp_base().join("bad.csv");
    fs::write(&path, "Kind,Category,Amount,Description,Date\nINCOME,Gift,1.00,x,2024-01-01\n")
        .unwrap();

    let err = manager.import_csv(LOGIN, &path).unwrap_err();

    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert!(manager.wallet(LOGIN).unwrap().transactions.is_empty());
}

#[test]
fn missing_import_file_is_a_storage_error() {
    let (mut manager, _) = signed_up_manager();
    let path = temp_base().join("nope.csv");

    assert!(matches!(
        manager.import_csv(LOGIN, &path),
        Err(LedgerError::StorageError(_))
    ));
}
