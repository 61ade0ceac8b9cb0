//! # Storage Module
//!
//! Handles all data persistence for the ledger.
//!
//! The domain layer only knows the [`KeyValueStorage`] port: three JSON
//! documents (incomes, expenses, members) read and written by string key.
//! The backend behind the port can be swapped without touching domain code.
//!
//! ## Current Implementations
//!
//! - **File storage**: one JSON file per key inside the data directory, plus
//!   `ledger_config.yaml` for configuration
//! - **Memory storage**: a map guarded by a mutex, for tests and embedding

pub mod file;
pub mod memory;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use file::{FileConnection, FileKeyValueRepository, LedgerConfig, LedgerConfigRepository, LedgerConfigStorage};
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStorage;
