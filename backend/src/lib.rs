//! # Canaan Ledger Backend
//!
//! Church income, expense and remittance ledger. The library is synchronous
//! and UI-free: a front end (or the bundled CLI) drives the [`Backend`], which
//! ties the ledger service to the view router and the on-disk configuration.

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use shared::{Expense, Income, UserRole, View};

pub mod domain;
pub mod storage;

use domain::export_service;
use domain::{LedgerResult, LedgerService, ViewRouter};
use storage::{
    FileConnection, FileKeyValueRepository, KeyValueStorage, LedgerConfig, LedgerConfigRepository,
    LedgerConfigStorage,
};

/// Main backend struct that owns the ledger and the screen state
pub struct Backend<S: KeyValueStorage> {
    pub ledger: LedgerService<S>,
    pub router: ViewRouter,
    pub config: LedgerConfig,
}

impl Backend<FileKeyValueRepository> {
    /// Open the ledger stored in the resolved data directory.
    ///
    /// `role` overrides the default role from `ledger_config.yaml`.
    pub fn open(data_dir: Option<PathBuf>, role: Option<UserRole>) -> Result<Self> {
        let connection = FileConnection::open(data_dir)?;
        let config = LedgerConfigRepository::new(connection.clone())
            .get_config()
            .context("Failed to load ledger configuration")?;

        let role = role.unwrap_or(config.default_role);
        let ledger = LedgerService::open(FileKeyValueRepository::new(connection.clone()), role)
            .with_context(|| {
                format!("Failed to load ledger from {}", connection.base_directory().display())
            })?;

        info!(
            "Opened ledger for {} in {} as {}",
            config.organization_name,
            connection.base_directory().display(),
            role
        );
        Ok(Self::new(ledger, config))
    }

    pub fn data_directory(&self) -> &Path {
        self.ledger.store().storage().connection().base_directory()
    }
}

impl<S: KeyValueStorage> Backend<S> {
    pub fn new(ledger: LedgerService<S>, config: LedgerConfig) -> Self {
        Self {
            ledger,
            router: ViewRouter::new(),
            config,
        }
    }

    /// Save the income form. Replaces the record being edited, if any, then
    /// returns to the dashboard.
    pub fn save_income(&mut self, income: Income) -> LedgerResult<Income> {
        let editing_id = self.router.editing_id().map(str::to_string);
        let saved = self.ledger.save_income(income, editing_id.as_deref())?;
        self.router.after_save();
        Ok(saved)
    }

    pub fn add_expense(&mut self, expense: Expense) -> LedgerResult<Expense> {
        let saved = self.ledger.add_expense(expense)?;
        self.router.after_save();
        Ok(saved)
    }

    pub fn swap_cash_for_remittance(&mut self, amount: f64) -> LedgerResult<Expense> {
        let swap = self.ledger.swap_cash_for_remittance(amount)?;
        self.router.after_save();
        Ok(swap)
    }

    /// Open an existing income in its form
    pub fn edit_income(&mut self, income_id: &str) -> LedgerResult<()> {
        let income = self
            .ledger
            .store()
            .income(income_id)
            .cloned()
            .ok_or_else(|| domain::LedgerError::IncomeNotFound(income_id.to_string()))?;
        self.router.edit_income(income);
        Ok(())
    }

    pub fn navigate(&mut self, view: View) {
        self.router.navigate(view);
    }

    /// Write the accounting journal into `directory`
    pub fn export_journal(&self, directory: &Path) -> Result<PathBuf> {
        let store = self.ledger.store();
        let export =
            export_service::export_journal_csv(store.incomes(), store.expenses(), self.ledger.today())?;
        export_service::write_export(&export, directory)
    }
}
