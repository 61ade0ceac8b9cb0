//! # Storage Traits
//!
//! This module defines the persistence port the record store writes through.
//! Every collection is saved as one JSON document under a string key, so any
//! backend that can get and put strings by key can host the ledger.

use anyhow::Result;

/// Trait defining the interface for key-value storage operations
///
/// Implementations are interchangeable: the domain layer only ever reads and
/// writes whole documents by key and never sees files, tables or maps.
pub trait KeyValueStorage: Send + Sync {
    /// Retrieve the document stored under `key`, if any
    fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Store a document under `key`, replacing any existing value
    fn put_value(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the document stored under `key`
    /// Returns true if something was deleted
    fn delete_value(&self, key: &str) -> Result<bool>;

    /// List all keys that currently hold a document
    fn list_keys(&self) -> Result<Vec<String>>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<T> {
    fn get_value(&self, key: &str) -> Result<Option<String>> {
        (**self).get_value(key)
    }

    fn put_value(&self, key: &str, value: &str) -> Result<()> {
        (**self).put_value(key, value)
    }

    fn delete_value(&self, key: &str) -> Result<bool> {
        (**self).delete_value(key)
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        (**self).list_keys()
    }
}
