//! Reconciliation of incomes against bank statements.
//!
//! Confirmation is one-way. The processor does not look at the current status,
//! so confirming twice only overwrites the statement date.

use chrono::NaiveDate;
use shared::{Income, TransactionStatus};

/// Confirm an income, stamping the bank statement date
pub fn confirm_income(income: &Income, bank_statement_date: NaiveDate) -> Income {
    let mut confirmed = income.clone();
    confirmed.status = TransactionStatus::Confirmed;
    confirmed.reconciliation_date = Some(bank_statement_date);
    confirmed
}

/// Incomes offered for conciliation
pub fn pending_incomes(incomes: &[Income]) -> Vec<&Income> {
    incomes.iter().filter(|i| i.is_pending()).collect()
}
