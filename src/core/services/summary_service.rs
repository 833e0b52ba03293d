//! Read-only projections for balance and budget screens.

use crate::ledger::Wallet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

/// One row of the budget overview.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn balance(wallet: &Wallet) -> BalanceSummary {
        let total_income = wallet.total_income();
        let total_expense = wallet.total_expense();
        BalanceSummary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    /// Budgets ordered by category key.
    pub fn budget_report(wallet: &Wallet) -> Vec<BudgetLine> {
        wallet
            .budgets_view()
            .into_iter()
            .map(|budget| BudgetLine {
                category: budget.category().name().to_string(),
                limit: budget.limit(),
                spent: budget.spent(),
                remaining: budget.remaining(),
            })
            .collect()
    }
}
