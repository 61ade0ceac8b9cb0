//! Test utilities with automatic cleanup
//!
//! The temporary directory lives as long as the environment, so test data is
//! removed even if a test panics.

use anyhow::Result;
use tempfile::TempDir;

use super::file::{FileConnection, FileKeyValueRepository};

pub struct TestEnvironment {
    pub connection: FileConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = FileConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    pub fn key_value_repository(&self) -> FileKeyValueRepository {
        FileKeyValueRepository::new(self.connection.clone())
    }
}
