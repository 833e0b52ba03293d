//! Advisory signals raised while posting transactions. None of them is an error.

use std::fmt;

use crate::ledger::{BudgetUsage, Transaction};

/// Default share of a budget limit at which spending counts as "approaching".
pub const DEFAULT_WARNING_RATIO: f64 = 0.8;

/// Budget threshold state after an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetAlert {
    Approaching,
    Exceeded,
}

impl BudgetAlert {
    /// Classifies `usage`; exceeding wins over approaching.
    pub fn evaluate(usage: BudgetUsage, warning_ratio: f64) -> Option<Self> {
        if usage.spent > usage.limit {
            Some(BudgetAlert::Exceeded)
        } else if usage.spent >= warning_ratio * usage.limit {
            Some(BudgetAlert::Approaching)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerNotice {
    Budget {
        alert: BudgetAlert,
        category: String,
        spent: f64,
        limit: f64,
    },
    Overspending {
        total_income: f64,
        total_expense: f64,
    },
    NonPositiveBalance {
        balance: f64,
    },
}

impl LedgerNotice {
    pub fn budget_alert(&self) -> Option<BudgetAlert> {
        match self {
            LedgerNotice::Budget { alert, .. } => Some(*alert),
            _ => None,
        }
    }
}

impl fmt::Display for LedgerNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerNotice::Budget {
                alert: BudgetAlert::Exceeded,
                category,
                spent,
                limit,
            } => write!(
                f,
                "Budget exceeded for category '{category}': spent {spent:.2} / limit {limit:.2}"
            ),
            LedgerNotice::Budget {
                alert: BudgetAlert::Approaching,
                category,
                spent,
                limit,
            } => write!(
                f,
                "Approaching budget limit for category '{category}': spent {spent:.2} / limit {limit:.2}"
            ),
            LedgerNotice::Overspending {
                total_income,
                total_expense,
            } => write!(
                f,
                "Total expenses ({total_expense:.2}) exceed total income ({total_income:.2})"
            ),
            LedgerNotice::NonPositiveBalance { balance } => {
                write!(f, "Wallet balance is zero or negative ({balance:.2})")
            }
        }
    }
}

/// Outcome of a successful posting.
#[derive(Debug, Clone)]
pub struct PostingReport {
    pub transaction: Transaction,
    pub notices: Vec<LedgerNotice>,
}

impl PostingReport {
    pub fn budget_alert(&self) -> Option<BudgetAlert> {
        self.notices.iter().find_map(LedgerNotice::budget_alert)
    }

    pub fn has_notice<F>(&self, predicate: F) -> bool
    where
        F: Fn(&LedgerNotice) -> bool,
    {
        self.notices.iter().any(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(spent: f64, limit: f64) -> BudgetUsage {
        BudgetUsage { spent, limit }
    }

    #[test]
    fn thresholds_follow_warning_ratio() {
        let ratio = DEFAULT_WARNING_RATIO;
        assert_eq!(BudgetAlert::evaluate(usage(79.0, 100.0), ratio), None);
        assert_eq!(
            BudgetAlert::evaluate(usage(80.0, 100.0), ratio),
            Some(BudgetAlert::Approaching)
        );
        assert_eq!(
            BudgetAlert::evaluate(usage(100.0, 100.0), ratio),
            Some(BudgetAlert::Approaching)
        );
        assert_eq!(
            BudgetAlert::evaluate(usage(100.01, 100.0), ratio),
            Some(BudgetAlert::Exceeded)
        );
    }

    #[test]
    fn notices_render_two_decimals() {
        let notice = LedgerNotice::Budget {
            alert: BudgetAlert::Exceeded,
            category: "Food".into(),
            spent: 110.0,
            limit: 100.0,
        };
        assert_eq!(
            notice.to_string(),
            "Budget exceeded for category 'Food': spent 110.00 / limit 100.00"
        );
    }
}
