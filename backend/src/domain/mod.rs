//! # Domain Module
//!
//! Contains all business logic for the church ledger.
//!
//! The domain works on three collections (incomes, expenses, members) held by
//! the record store and knows nothing about how they are persisted beyond the
//! [`crate::storage::KeyValueStorage`] port.
//!
//! ## Module Organization
//!
//! - **record_store**: in-memory collections mirrored to storage on every mutation
//! - **balance_service**: cash, bank and remittance totals, per-account balances, movements
//! - **remittance_service**: marking remittances sent and the bulk cash swap
//! - **reconciliation_service**: confirming incomes against bank statements
//! - **report_service**: category totals over a date window
//! - **export_service**: double-entry journal CSV for the bookkeeper
//! - **view_router**: active screen and income edit context
//! - **ledger_service**: the operations callers use, tying the above together
//!
//! ## Business Rules
//!
//! - Balances are derived on every read and never stored
//! - Only confirmed incomes count as money in hand
//! - Remittance-bound breakdown is owed onward whether or not the income is confirmed
//! - Every `Remesas` expense settles part of what is owed onward
//! - Expenses are never edited or deleted

pub mod balance_service;
pub mod commands;
pub mod error;
pub mod export_service;
pub mod ids;
pub mod ledger_service;
pub mod reconciliation_service;
pub mod record_store;
pub mod remittance_service;
pub mod report_service;
pub mod view_router;

#[cfg(test)]
pub mod test_fixtures;

pub use balance_service::{AccountBalance, Movement, MovementFilter, MovementKind};
pub use error::{LedgerError, LedgerResult};
pub use export_service::{JournalExport, JournalLine};
pub use ids::{Clock, FixedClock, IdGenerator, SequentialIdGenerator, SystemClock, UuidIdGenerator};
pub use ledger_service::LedgerService;
pub use record_store::{LoadWarning, RecordStore};
pub use remittance_service::RemittanceOutcome;
pub use report_service::{CategoryTotal, LedgerReport};
pub use view_router::{EditContext, ViewRouter};
