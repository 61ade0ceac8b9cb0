//! The record store: the three ledger collections held in memory and mirrored
//! to key-value storage after every mutation.
//!
//! Each collection is one JSON array under its own key (`canaan_incomes`,
//! `canaan_expenses`, `canaan_members`). A mutation updates memory first and
//! then rewrites the whole affected document. Memory is the source of truth:
//! if a write fails the error is returned, the in-memory change stays, and the
//! next successful write of that collection catches storage up. The one
//! exception is a remittance commit, which spans two documents and is rolled
//! back as a whole when either write fails.

use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{seed_members, Expense, Income, Member, EXPENSES_KEY, INCOMES_KEY, MEMBERS_KEY};

use crate::domain::error::{LedgerError, LedgerResult};
use crate::storage::KeyValueStorage;

/// Suffix of the key under which an unreadable document is preserved
pub const MALFORMED_BACKUP_SUFFIX: &str = "_malformed";

/// A collection that could not be read and was replaced by its default
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    pub key: &'static str,
    pub message: String,
}

pub struct RecordStore<S: KeyValueStorage> {
    storage: S,
    incomes: Vec<Income>,
    expenses: Vec<Expense>,
    members: Vec<Member>,
    load_warnings: Vec<LoadWarning>,
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// Load all collections from storage.
    ///
    /// Missing documents start empty (members start from the seed list).
    /// Malformed documents are copied to `<key>_malformed`, replaced by the
    /// default in memory and reported through [`RecordStore::load_warnings`].
    /// Only a failing storage backend is an error.
    pub fn load(storage: S) -> LedgerResult<Self> {
        let mut load_warnings = Vec::new();

        let incomes = load_collection(&storage, INCOMES_KEY, Vec::new, &mut load_warnings)?;
        let expenses = load_collection(&storage, EXPENSES_KEY, Vec::new, &mut load_warnings)?;
        let members = load_collection(&storage, MEMBERS_KEY, seed_members, &mut load_warnings)?;

        info!(
            "Loaded {} incomes, {} expenses, {} members",
            incomes.len(),
            expenses.len(),
            members.len()
        );

        Ok(Self {
            storage,
            incomes,
            expenses,
            members,
            load_warnings,
        })
    }

    pub fn incomes(&self) -> &[Income] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn income(&self, income_id: &str) -> Option<&Income> {
        self.incomes.iter().find(|i| i.id == income_id)
    }

    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.load_warnings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn insert_income(&mut self, income: Income) -> LedgerResult<()> {
        debug!("Inserting income {}", income.id);
        self.incomes.push(income);
        self.persist_incomes()
    }

    /// Replace the income stored under `income_id` (the record being edited)
    pub fn replace_income(&mut self, income_id: &str, income: Income) -> LedgerResult<()> {
        let slot = self
            .incomes
            .iter_mut()
            .find(|i| i.id == income_id)
            .ok_or_else(|| LedgerError::IncomeNotFound(income_id.to_string()))?;
        debug!("Replacing income {} with {}", income_id, income.id);
        *slot = income;
        self.persist_incomes()
    }

    /// Hard delete. There is no tombstone.
    pub fn remove_income(&mut self, income_id: &str) -> LedgerResult<Income> {
        let position = self
            .incomes
            .iter()
            .position(|i| i.id == income_id)
            .ok_or_else(|| LedgerError::IncomeNotFound(income_id.to_string()))?;
        let removed = self.incomes.remove(position);
        self.persist_incomes()?;
        Ok(removed)
    }

    pub fn insert_expense(&mut self, expense: Expense) -> LedgerResult<()> {
        debug!("Inserting expense {}", expense.id);
        self.expenses.push(expense);
        self.persist_expenses()
    }

    /// Replace an income and append the expense it produced, as one change.
    ///
    /// Nothing is touched when the income does not exist. If either document
    /// fails to write, memory is restored and the previous incomes document is
    /// written back, so storage never holds the income without its expense.
    pub fn commit_income_with_expense(
        &mut self,
        income: Income,
        expense: Option<Expense>,
    ) -> LedgerResult<()> {
        let position = self
            .incomes
            .iter()
            .position(|i| i.id == income.id)
            .ok_or_else(|| LedgerError::IncomeNotFound(income.id.clone()))?;

        let previous_income = std::mem::replace(&mut self.incomes[position], income);
        let previous_expense_count = self.expenses.len();
        let has_expense = expense.is_some();
        if let Some(expense) = expense {
            self.expenses.push(expense);
        }

        let result = self.persist_incomes().and_then(|()| {
            if has_expense {
                self.persist_expenses()
            } else {
                Ok(())
            }
        });

        if let Err(e) = result {
            error!(
                "Failed to commit income {}, rolling back: {}",
                previous_income.id, e
            );
            self.incomes[position] = previous_income;
            self.expenses.truncate(previous_expense_count);
            if let Err(restore_error) = self.persist_incomes() {
                error!("Failed to restore stored incomes: {}", restore_error);
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn insert_member(&mut self, member: Member) -> LedgerResult<()> {
        if self.member(&member.id).is_some() {
            return Err(LedgerError::DuplicateMember(member.id));
        }
        self.members.push(member);
        self.persist_members()
    }

    pub fn replace_member(&mut self, member: Member) -> LedgerResult<()> {
        let slot = self
            .members
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or_else(|| LedgerError::MemberNotFound(member.id.clone()))?;
        *slot = member;
        self.persist_members()
    }

    /// Removes the member record only; incomes keep their own copies of the
    /// member id and name.
    pub fn remove_member(&mut self, member_id: &str) -> LedgerResult<Member> {
        let position = self
            .members
            .iter()
            .position(|m| m.id == member_id)
            .ok_or_else(|| LedgerError::MemberNotFound(member_id.to_string()))?;
        let removed = self.members.remove(position);
        self.persist_members()?;
        Ok(removed)
    }

    fn persist_incomes(&self) -> LedgerResult<()> {
        persist(&self.storage, INCOMES_KEY, &self.incomes)
    }

    fn persist_expenses(&self) -> LedgerResult<()> {
        persist(&self.storage, EXPENSES_KEY, &self.expenses)
    }

    fn persist_members(&self) -> LedgerResult<()> {
        persist(&self.storage, MEMBERS_KEY, &self.members)
    }
}

fn load_collection<S, T, F>(
    storage: &S,
    key: &'static str,
    default: F,
    warnings: &mut Vec<LoadWarning>,
) -> LedgerResult<Vec<T>>
where
    S: KeyValueStorage,
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    let raw = match storage.get_value(key)? {
        Some(raw) => raw,
        None => {
            debug!("Nothing stored under {}, starting from default", key);
            return Ok(default());
        }
    };

    match serde_json::from_str(&raw) {
        Ok(records) => Ok(records),
        Err(e) => {
            let backup_key = format!("{}{}", key, MALFORMED_BACKUP_SUFFIX);
            warn!(
                "Stored {} is not valid ({}); keeping a copy under {} and starting from default",
                key, e, backup_key
            );
            storage.put_value(&backup_key, &raw)?;
            warnings.push(LoadWarning {
                key,
                message: e.to_string(),
            });
            Ok(default())
        }
    }
}

fn persist<S: KeyValueStorage, T: Serialize>(
    storage: &S,
    key: &'static str,
    records: &[T],
) -> LedgerResult<()> {
    let json =
        serde_json::to_string(records).map_err(|source| LedgerError::Serialization { key, source })?;
    storage.put_value(key, &json)?;
    debug!("Persisted {} records under {}", records.len(), key);
    Ok(())
}
