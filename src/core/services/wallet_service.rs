//! Posting income and expenses, plus read-side queries over a wallet.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::core::notice::{BudgetAlert, LedgerNotice, PostingReport};
use crate::core::registry::CategoryRegistry;
use crate::errors::{ensure_positive, Result};
use crate::ledger::{CategoryFilter, CategoryMatch, Transaction, TransactionType, Wallet};

/// Stateless posting and query helpers for [`Wallet`] aggregates.
pub struct WalletService;

impl WalletService {
    /// Records an income and reports overspending if expenses still exceed income.
    pub fn post_income(
        registry: &mut dyn CategoryRegistry,
        wallet: &mut Wallet,
        amount: f64,
        category_name: &str,
        description: &str,
    ) -> Result<PostingReport> {
        ensure_positive(amount, "Amount")?;
        let category = registry.resolve(category_name)?;
        let transaction =
            Transaction::new(TransactionType::Income, category, amount, description);
        wallet.transactions.append(transaction.clone());
        debug!(owner = wallet.owner_login(), amount, "posted income");

        let mut notices = Vec::new();
        push_overspending(wallet, &mut notices);
        Ok(report(transaction, notices))
    }

    /// Records an expense, charges the category budget, and raises threshold notices.
    pub fn post_expense(
        registry: &mut dyn CategoryRegistry,
        wallet: &mut Wallet,
        amount: f64,
        category_name: &str,
        description: &str,
        warning_ratio: f64,
    ) -> Result<PostingReport> {
        ensure_positive(amount, "Amount")?;
        let category = registry.resolve(category_name)?;
        let transaction =
            Transaction::new(TransactionType::Expense, category.clone(), amount, description);
        wallet.transactions.append(transaction.clone());
        debug!(owner = wallet.owner_login(), amount, "posted expense");

        let mut notices = Vec::new();
        if let Some(usage) = wallet.budgets.record_expense(&category, amount) {
            if let Some(alert) = BudgetAlert::evaluate(usage, warning_ratio) {
                notices.push(LedgerNotice::Budget {
                    alert,
                    category: category.name().to_string(),
                    spent: usage.spent,
                    limit: usage.limit,
                });
            }
        }
        push_overspending(wallet, &mut notices);
        let balance = wallet.balance();
        if balance <= 0.0 {
            notices.push(LedgerNotice::NonPositiveBalance { balance });
        }
        Ok(report(transaction, notices))
    }

    /// Transactions dated between `start` and `end`, both inclusive.
    pub fn transactions_in_period(
        wallet: &Wallet,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<&Transaction>> {
        wallet.transactions.in_period(start, end)
    }

    pub fn income_by_categories(wallet: &Wallet, names: &[&str], mode: CategoryMatch) -> f64 {
        let filter = CategoryFilter::new(names.iter().copied(), mode);
        wallet
            .transactions
            .sum_by(TransactionType::Income, Some(&filter))
    }

    pub fn expense_by_categories(wallet: &Wallet, names: &[&str], mode: CategoryMatch) -> f64 {
        let filter = CategoryFilter::new(names.iter().copied(), mode);
        wallet
            .transactions
            .sum_by(TransactionType::Expense, Some(&filter))
    }
}

fn push_overspending(wallet: &Wallet, notices: &mut Vec<LedgerNotice>) {
    let total_income = wallet.total_income();
    let total_expense = wallet.total_expense();
    if total_expense > total_income {
        notices.push(LedgerNotice::Overspending {
            total_income,
            total_expense,
        });
    }
}

fn report(transaction: Transaction, notices: Vec<LedgerNotice>) -> PostingReport {
    for notice in &notices {
        warn!(category = transaction.category().name(), "{notice}");
    }
    PostingReport {
        transaction,
        notices,
    }
}
