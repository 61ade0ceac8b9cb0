//! Remittance processing: money collected for the central church leaving the
//! local accounts.
//!
//! Two paths produce `Remesas` expenses and they are deliberately separate:
//! - marking a single income's remittance as sent, which emits an expense for
//!   exactly that income's remittance-bound portion;
//! - a bulk cash swap, a manual amount taken out of the cash register with no
//!   link to any income.

use chrono::NaiveDate;
use log::{debug, info};
use shared::{
    Expense, ExpenseCategory, FundSource, Income, UserRole, AUTO_REMITTANCE_ID_PREFIX,
    CENTRAL_CHURCH, SWAP_DESCRIPTION, SWAP_ID_PREFIX,
};

use crate::domain::balance_service::remittance_bound_portion;
use crate::domain::ids::IdGenerator;

/// The income after the send, and the expense it generated (if any)
#[derive(Debug, Clone, PartialEq)]
pub struct RemittanceOutcome {
    pub income: Income,
    pub expense: Option<Expense>,
}

/// Human-readable route of a remittance
pub fn remittance_description(origin: &str, destination: FundSource) -> String {
    format!("Giro de Remesa: {} → {}", origin, destination)
}

/// Mark the income's remittance as sent and build the matching expense.
///
/// The flag and date are set whatever the amount. An expense is emitted only
/// when the income has a positive remittance-bound portion.
pub fn mark_remittance_sent(
    income: &Income,
    sent_date: NaiveDate,
    destination: FundSource,
    responsible: UserRole,
    ids: &dyn IdGenerator,
) -> RemittanceOutcome {
    let mut updated = income.clone();
    updated.remittance_sent = Some(true);
    updated.remittance_sent_date = Some(sent_date);

    let portion = remittance_bound_portion(income);
    if portion <= 0.0 {
        debug!("Income {} has no remittance portion, no expense generated", income.id);
        return RemittanceOutcome {
            income: updated,
            expense: None,
        };
    }

    let expense = Expense {
        id: ids.next_id(AUTO_REMITTANCE_ID_PREFIX),
        date: sent_date,
        amount: portion,
        category: ExpenseCategory::Remittances,
        source: destination,
        responsible: responsible.to_string(),
        third_party: CENTRAL_CHURCH.to_string(),
        description: remittance_description(income.origin_name(), destination),
    };
    info!(
        "Remittance of {:.2} for income {} recorded as expense {}",
        portion, income.id, expense.id
    );

    RemittanceOutcome {
        income: updated,
        expense: Some(expense),
    }
}

/// Manual bulk remittance paid out of the cash register
pub fn swap_cash_for_remittance(
    amount: f64,
    today: NaiveDate,
    responsible: UserRole,
    ids: &dyn IdGenerator,
) -> Expense {
    Expense {
        id: ids.next_id(SWAP_ID_PREFIX),
        date: today,
        amount,
        category: ExpenseCategory::Remittances,
        source: FundSource::CashRegister,
        responsible: responsible.to_string(),
        third_party: CENTRAL_CHURCH.to_string(),
        description: SWAP_DESCRIPTION.to_string(),
    }
}

/// Incomes whose remittance portion is still waiting to be sent
pub fn remittance_queue(incomes: &[Income]) -> Vec<&Income> {
    incomes
        .iter()
        .filter(|i| !i.is_remittance_sent() && remittance_bound_portion(i) > 0.0)
        .collect()
}
