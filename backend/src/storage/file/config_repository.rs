//! # Ledger Config Repository
//!
//! File-based configuration stored as a single YAML file `ledger_config.yaml`
//! at the root of the data directory.
//!
//! ```text
//! data/
//! ├── ledger_config.yaml    ← This module manages this file
//! ├── canaan_incomes.json
//! ├── canaan_expenses.json
//! └── canaan_members.json
//! ```
//!
//! ```yaml
//! organization_name: "Iglesia Canaán"
//! default_role: "Tesorero"
//! data_format_version: "1.0"
//! created_at: "2025-01-21T19:30:00Z"
//! updated_at: "2025-01-21T19:35:00Z"
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::UserRole;
use std::fs;
use std::path::PathBuf;

use super::connection::FileConnection;

pub const CONFIG_FILE_NAME: &str = "ledger_config.yaml";
pub const DATA_FORMAT_VERSION: &str = "1.0";

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Name printed on reports and exports
    pub organization_name: String,
    /// Role assumed when no role is chosen explicitly
    pub default_role: UserRole,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            organization_name: "Iglesia Canaán".to_string(),
            default_role: UserRole::Admin,
            data_format_version: DATA_FORMAT_VERSION.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Storage trait for ledger configuration operations
pub trait LedgerConfigStorage: Send + Sync {
    /// Get the configuration, creating the default file when missing
    fn get_config(&self) -> Result<LedgerConfig>;

    /// Replace the configuration
    fn update_config(&self, config: &LedgerConfig) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct LedgerConfigRepository {
    connection: FileConnection,
}

impl LedgerConfigRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    fn config_path(&self) -> PathBuf {
        self.connection.base_directory().join(CONFIG_FILE_NAME)
    }

    fn load_or_create_config(&self) -> Result<LedgerConfig> {
        let config_path = self.config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("read {}", config_path.display()))?;
            let config: LedgerConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("parse {}", config_path.display()))?;
            debug!("Loaded ledger config from {:?}", config_path);
            Ok(config)
        } else {
            let config = LedgerConfig::default();
            self.save_config(&config)?;
            info!("Created default ledger config at {:?}", config_path);
            Ok(config)
        }
    }

    fn save_config(&self, config: &LedgerConfig) -> Result<()> {
        let config_path = self.config_path();
        let yaml_content = serde_yaml::to_string(config).context("serialize ledger config")?;
        self.connection.write_atomic(&config_path, &yaml_content)?;
        debug!("Saved ledger config to {:?}", config_path);
        Ok(())
    }
}

impl LedgerConfigStorage for LedgerConfigRepository {
    fn get_config(&self) -> Result<LedgerConfig> {
        self.load_or_create_config()
    }

    fn update_config(&self, config: &LedgerConfig) -> Result<()> {
        let mut updated_config = config.clone();
        updated_config.updated_at = Utc::now().to_rfc3339();
        self.save_config(&updated_config)?;
        info!("Updated ledger config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;

    #[test]
    fn test_get_config_creates_default_file() {
        let env = TestEnvironment::new().unwrap();
        let repo = LedgerConfigRepository::new(env.connection.clone());

        let config = repo.get_config().unwrap();

        assert_eq!(config.default_role, UserRole::Admin);
        assert_eq!(config.data_format_version, DATA_FORMAT_VERSION);
        assert!(env.base_path.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_update_config_persists_role() {
        let env = TestEnvironment::new().unwrap();
        let repo = LedgerConfigRepository::new(env.connection.clone());

        let mut config = repo.get_config().unwrap();
        config.default_role = UserRole::Treasurer;
        config.organization_name = "Iglesia Canaán Sede Norte".to_string();
        repo.update_config(&config).unwrap();

        let reloaded = repo.get_config().unwrap();
        assert_eq!(reloaded.default_role, UserRole::Treasurer);
        assert_eq!(reloaded.organization_name, "Iglesia Canaán Sede Norte");

        let raw = fs::read_to_string(env.base_path.join(CONFIG_FILE_NAME)).unwrap();
        assert!(raw.contains("Tesorero"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let env = TestEnvironment::new().unwrap();
        fs::write(env.base_path.join(CONFIG_FILE_NAME), "default_role: [").unwrap();

        let repo = LedgerConfigRepository::new(env.connection.clone());
        assert!(repo.get_config().is_err());
    }
}
