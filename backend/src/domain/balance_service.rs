//! Balance aggregation for the ledger.
//!
//! Balances are never stored. Every read recomputes them from the full income
//! and expense collections:
//!
//! 1. Confirmed incomes add their total to cash (method `Efectivo`) or banks.
//!    Pending incomes are not money in hand and add nothing.
//! 2. Every income, pending or not, adds its remittance-bound breakdown
//!    (`Iglesia Central`, `Pastora Principal`) to what is owed onward.
//! 3. Every expense is subtracted from cash if it came out of the cash
//!    register, otherwise from banks.
//! 4. `Remesas` expenses are subtracted from what is owed onward.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{Balances, Expense, FundSource, Income, TransactionMethod};

/// Portion of one income owed to the central church
pub fn remittance_bound_portion(income: &Income) -> f64 {
    income
        .breakdown
        .iter()
        .filter(|b| b.category.is_remittance_bound())
        .map(|b| b.amount)
        .sum()
}

/// Compute cash, bank and outstanding remittance totals
pub fn compute_balances(incomes: &[Income], expenses: &[Expense]) -> Balances {
    let mut cash = 0.0;
    let mut banks = 0.0;
    let mut remittance_in = 0.0;
    let mut remittance_out = 0.0;

    for income in incomes {
        if income.is_confirmed() {
            match income.method {
                TransactionMethod::Cash => cash += income.total,
                TransactionMethod::Bank => banks += income.total,
            }
        }
        remittance_in += remittance_bound_portion(income);
    }

    for expense in expenses {
        if expense.source.is_cash_register() {
            cash -= expense.amount;
        } else {
            banks -= expense.amount;
        }
        if expense.is_remittance() {
            remittance_out += expense.amount;
        }
    }

    Balances {
        cash,
        banks,
        remittances: remittance_in - remittance_out,
    }
}

/// Balance of a single account
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub source: FundSource,
    pub balance: f64,
}

/// Per-account breakdown of `cash` and `banks`, in `FundSource::ALL` order.
/// The non-cash accounts always sum to `Balances::banks`; a bank income
/// stamped `N/A` lands in the `N/A` account.
pub fn account_balances(incomes: &[Income], expenses: &[Expense]) -> Vec<AccountBalance> {
    FundSource::ALL
        .iter()
        .map(|source| {
            let received: f64 = incomes
                .iter()
                .filter(|i| i.is_confirmed() && i.fund_source() == *source)
                .map(|i| i.total)
                .sum();
            let spent: f64 = expenses
                .iter()
                .filter(|e| e.source == *source)
                .map(|e| e.amount)
                .sum();
            AccountBalance {
                source: *source,
                balance: received - spent,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    Income,
    Expense,
}

/// A signed line in the cash or bank detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: String,
    pub date: NaiveDate,
    pub kind: MovementKind,
    pub source: FundSource,
    pub description: String,
    /// Positive for money in, negative for money out
    pub amount: f64,
}

/// Which side of the ledger a detail view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementFilter {
    Cash,
    Banks,
}

impl MovementFilter {
    fn accepts(&self, source: FundSource) -> bool {
        match self {
            MovementFilter::Cash => source.is_cash_register(),
            MovementFilter::Banks => !source.is_cash_register(),
        }
    }
}

/// Movements behind a cash or bank balance, oldest first.
/// Only confirmed incomes are listed, matching what the balance counts.
pub fn movements(incomes: &[Income], expenses: &[Expense], filter: MovementFilter) -> Vec<Movement> {
    let income_lines = incomes
        .iter()
        .filter(|i| i.is_confirmed() && filter.accepts(i.fund_source()))
        .map(|i| Movement {
            id: i.id.clone(),
            date: i.date,
            kind: MovementKind::Income,
            source: i.fund_source(),
            description: i.member_name.clone(),
            amount: i.total,
        });

    let expense_lines = expenses
        .iter()
        .filter(|e| filter.accepts(e.source))
        .map(|e| Movement {
            id: e.id.clone(),
            date: e.date,
            kind: MovementKind::Expense,
            source: e.source,
            description: e.description.clone(),
            amount: -e.amount,
        });

    let mut lines: Vec<Movement> = income_lines.chain(expense_lines).collect();
    lines.sort_by(|a, b| a.date.cmp(&b.date));
    lines
}
