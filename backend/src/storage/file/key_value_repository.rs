use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;

use super::connection::FileConnection;
use crate::storage::traits::KeyValueStorage;

/// File-backed key-value repository: one `<key>.json` document per key
#[derive(Clone, Debug)]
pub struct FileKeyValueRepository {
    connection: FileConnection,
}

impl FileKeyValueRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &FileConnection {
        &self.connection
    }
}

impl KeyValueStorage for FileKeyValueRepository {
    fn get_value(&self, key: &str) -> Result<Option<String>> {
        let path = self.connection.document_path(key)?;

        if !path.exists() {
            debug!("No document stored for key {}", key);
            return Ok(None);
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        Ok(Some(content))
    }

    fn put_value(&self, key: &str, value: &str) -> Result<()> {
        let path = self.connection.document_path(key)?;
        self.connection.write_atomic(&path, value)?;
        debug!("Stored {} bytes under key {}", value.len(), key);
        Ok(())
    }

    fn delete_value(&self, key: &str) -> Result<bool> {
        let path = self.connection.document_path(key)?;

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
        info!("Deleted document for key {}", key);
        Ok(true)
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(self.connection.base_directory())? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if FileConnection::is_valid_key(stem) {
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;

    #[test]
    fn test_put_and_get_value() {
        let env = TestEnvironment::new().unwrap();
        let repo = FileKeyValueRepository::new(env.connection.clone());

        assert_eq!(repo.get_value("canaan_incomes").unwrap(), None);

        repo.put_value("canaan_incomes", "[]").unwrap();
        assert_eq!(repo.get_value("canaan_incomes").unwrap(), Some("[]".to_string()));

        repo.put_value("canaan_incomes", "[1]").unwrap();
        assert_eq!(repo.get_value("canaan_incomes").unwrap(), Some("[1]".to_string()));
    }

    #[test]
    fn test_delete_value() {
        let env = TestEnvironment::new().unwrap();
        let repo = FileKeyValueRepository::new(env.connection.clone());

        repo.put_value("canaan_members", "[]").unwrap();
        assert!(repo.delete_value("canaan_members").unwrap());
        assert!(!repo.delete_value("canaan_members").unwrap());
        assert_eq!(repo.get_value("canaan_members").unwrap(), None);
    }

    #[test]
    fn test_list_keys_ignores_other_files() {
        let env = TestEnvironment::new().unwrap();
        let repo = FileKeyValueRepository::new(env.connection.clone());

        repo.put_value("canaan_expenses", "[]").unwrap();
        repo.put_value("canaan_incomes", "[]").unwrap();
        fs::write(env.base_path.join("ledger_config.yaml"), "x: 1").unwrap();

        assert_eq!(
            repo.list_keys().unwrap(),
            vec!["canaan_expenses".to_string(), "canaan_incomes".to_string()]
        );
    }

    #[test]
    fn test_invalid_key_is_an_error() {
        let env = TestEnvironment::new().unwrap();
        let repo = FileKeyValueRepository::new(env.connection.clone());
        assert!(repo.put_value("../outside", "[]").is_err());
        assert!(repo.get_value("a/b").is_err());
    }
}
