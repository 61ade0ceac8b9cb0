//! The ledger service: every user-facing operation on the record store.
//!
//! Processors in the sibling modules are pure functions over records. This
//! service looks records up, runs the processor, and hands the result back to
//! the store to commit and persist. It also holds the current role, which is
//! written as `responsible` on every expense the system generates.

use chrono::NaiveDate;
use log::{debug, info, warn};
use shared::{Balances, Expense, Income, Member, UserRole};

use crate::domain::balance_service::{self, AccountBalance, Movement, MovementFilter};
use crate::domain::commands::income::{
    ConfirmIncomeCommand, DeleteIncomeResult, MarkRemittanceSentCommand,
};
use crate::domain::commands::member::{DeleteMemberResult, UpdateMemberCommand};
use crate::domain::commands::report::ReportQuery;
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::ids::{Clock, IdGenerator, SystemClock, UuidIdGenerator};
use crate::domain::reconciliation_service;
use crate::domain::record_store::RecordStore;
use crate::domain::remittance_service::{self, RemittanceOutcome};
use crate::domain::report_service::{self, LedgerReport};
use crate::storage::KeyValueStorage;

/// Largest difference tolerated between an income's total and its breakdown
const BREAKDOWN_TOLERANCE: f64 = 0.005;

pub struct LedgerService<S: KeyValueStorage> {
    store: RecordStore<S>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    role: UserRole,
}

impl<S: KeyValueStorage> LedgerService<S> {
    pub fn new(
        store: RecordStore<S>,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
        role: UserRole,
    ) -> Self {
        Self {
            store,
            ids,
            clock,
            role,
        }
    }

    /// Load the store from `storage` with UUID ids and the system clock
    pub fn open(storage: S, role: UserRole) -> LedgerResult<Self> {
        let store = RecordStore::load(storage)?;
        Ok(Self::new(
            store,
            Box::new(UuidIdGenerator),
            Box::new(SystemClock),
            role,
        ))
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn set_role(&mut self, role: UserRole) {
        info!("Switching role from {} to {}", self.role, role);
        self.role = role;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // Balances and detail views

    pub fn balances(&self) -> Balances {
        balance_service::compute_balances(self.store.incomes(), self.store.expenses())
    }

    pub fn account_balances(&self) -> Vec<AccountBalance> {
        balance_service::account_balances(self.store.incomes(), self.store.expenses())
    }

    pub fn movements(&self, filter: MovementFilter) -> Vec<Movement> {
        balance_service::movements(self.store.incomes(), self.store.expenses(), filter)
    }

    pub fn report(&self, query: ReportQuery) -> LedgerReport {
        report_service::build_report(self.store.incomes(), self.store.expenses(), query)
    }

    // Incomes

    /// Save an income form. With `editing_id` the stored record with that id is
    /// replaced, otherwise the income is appended.
    pub fn save_income(&mut self, income: Income, editing_id: Option<&str>) -> LedgerResult<Income> {
        let breakdown_total = income.breakdown_total();
        if (breakdown_total - income.total).abs() > BREAKDOWN_TOLERANCE {
            warn!(
                "Income {} total {:.2} does not match its breakdown {:.2}",
                income.id, income.total, breakdown_total
            );
        }

        match editing_id {
            Some(editing_id) => {
                info!("Updating income {}", editing_id);
                self.store.replace_income(editing_id, income.clone())?;
            }
            None => {
                info!(
                    "Recording income {} from {} for {:.2}",
                    income.id, income.member_name, income.total
                );
                self.store.insert_income(income.clone())?;
            }
        }
        Ok(income)
    }

    pub fn delete_income(&mut self, income_id: &str) -> LedgerResult<DeleteIncomeResult> {
        info!("Deleting income {}", income_id);
        let income = self.store.remove_income(income_id).map_err(log_not_found)?;
        let success_message = format!("Income {} from {} deleted", income.id, income.member_name);
        Ok(DeleteIncomeResult {
            income,
            success_message,
        })
    }

    pub fn pending_incomes(&self) -> Vec<&Income> {
        reconciliation_service::pending_incomes(self.store.incomes())
    }

    pub fn confirm_income(&mut self, command: ConfirmIncomeCommand) -> LedgerResult<Income> {
        let income = self.find_income(&command.income_id)?;
        let confirmed = reconciliation_service::confirm_income(income, command.bank_statement_date);
        self.store
            .replace_income(&command.income_id, confirmed.clone())?;
        info!(
            "Confirmed income {} against statement of {}",
            command.income_id, command.bank_statement_date
        );
        Ok(confirmed)
    }

    // Remittances

    pub fn remittance_queue(&self) -> Vec<&Income> {
        remittance_service::remittance_queue(self.store.incomes())
    }

    pub fn mark_remittance_sent(
        &mut self,
        command: MarkRemittanceSentCommand,
    ) -> LedgerResult<RemittanceOutcome> {
        let income = self.find_income(&command.income_id)?;
        let outcome = remittance_service::mark_remittance_sent(
            income,
            command.sent_date,
            command.destination,
            self.role,
            self.ids.as_ref(),
        );
        self.store
            .commit_income_with_expense(outcome.income.clone(), outcome.expense.clone())?;
        Ok(outcome)
    }

    /// Record a bulk cash remittance dated today
    pub fn swap_cash_for_remittance(&mut self, amount: f64) -> LedgerResult<Expense> {
        let expense = remittance_service::swap_cash_for_remittance(
            amount,
            self.clock.today(),
            self.role,
            self.ids.as_ref(),
        );
        info!("Swapping {:.2} of cash for remittances as {}", amount, expense.id);
        self.store.insert_expense(expense.clone())?;
        Ok(expense)
    }

    // Expenses

    pub fn add_expense(&mut self, expense: Expense) -> LedgerResult<Expense> {
        info!(
            "Recording expense {} of {:.2} from {}",
            expense.id, expense.amount, expense.source
        );
        self.store.insert_expense(expense.clone())?;
        Ok(expense)
    }

    // Members

    pub fn add_member(&mut self, member: Member) -> LedgerResult<Member> {
        info!("Adding member {} ({})", member.name, member.id);
        self.store.insert_member(member.clone())?;
        Ok(member)
    }

    pub fn update_member(&mut self, command: UpdateMemberCommand) -> LedgerResult<Member> {
        let mut member = self
            .store
            .member(&command.member_id)
            .cloned()
            .ok_or_else(|| LedgerError::MemberNotFound(command.member_id.clone()))
            .map_err(log_not_found)?;

        if let Some(name) = command.name {
            member.name = name.trim().to_string();
        }
        if let Some(join_date) = command.join_date {
            member.join_date = join_date;
        }
        if let Some(status) = command.status {
            member.status = status;
        }

        self.store.replace_member(member.clone())?;
        info!("Updated member {}", member.id);
        Ok(member)
    }

    /// Removes the member from the roster. Recorded incomes are untouched.
    pub fn delete_member(&mut self, member_id: &str) -> LedgerResult<DeleteMemberResult> {
        info!("Deleting member {}", member_id);
        let member = self.store.remove_member(member_id).map_err(log_not_found)?;
        let success_message = format!("Member {} removed", member.name);
        Ok(DeleteMemberResult {
            member,
            success_message,
        })
    }

    /// Members offered for selection on income forms
    pub fn active_members(&self) -> Vec<&Member> {
        self.store.members().iter().filter(|m| m.is_active()).collect()
    }

    fn find_income(&self, income_id: &str) -> LedgerResult<&Income> {
        debug!("Looking up income {}", income_id);
        self.store
            .income(income_id)
            .ok_or_else(|| LedgerError::IncomeNotFound(income_id.to_string()))
            .map_err(log_not_found)
    }
}

fn log_not_found(error: LedgerError) -> LedgerError {
    if error.is_not_found() {
        warn!("{}", error);
    }
    error
}
