//! # File Storage Module
//!
//! Stores every ledger collection as a JSON document in the data directory,
//! next to a YAML configuration file.
//!
//! ## File Format
//!
//! Each key maps to `<key>.json` holding exactly the JSON text the record
//! store produced, for example `canaan_incomes.json`:
//! ```json
//! [{"id":"ing-1","date":"2024-03-03","worshipDate":"2024-03-03", ...}]
//! ```
//!
//! Writes go through a temp file and a rename so a crash never leaves a
//! half-written document behind.

pub mod config_repository;
pub mod connection;
pub mod key_value_repository;

pub use config_repository::{LedgerConfig, LedgerConfigRepository, LedgerConfigStorage};
pub use connection::FileConnection;
pub use key_value_repository::FileKeyValueRepository;
