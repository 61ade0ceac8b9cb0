use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "CANAAN_LEDGER_DIR";
/// File inside the default data directory that points somewhere else
pub const REDIRECT_FILE_NAME: &str = ".ledger_redirect";
const DEFAULT_DIRECTORY_NAME: &str = "Canaan Ledger";

/// FileConnection manages the data directory and the files inside it
#[derive(Clone, Debug)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a new file connection rooted at `base_directory`
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the resolved data directory
    ///
    /// Resolution order: explicit path, `CANAAN_LEDGER_DIR`, then
    /// `~/Documents/Canaan Ledger` (following a redirect file if present).
    pub fn open(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Using data directory from command line: {}", path.display());
            return Self::new(path);
        }

        if let Ok(path) = std::env::var(DATA_DIR_ENV) {
            if !path.trim().is_empty() {
                info!("Using data directory from {}: {}", DATA_DIR_ENV, path);
                return Self::new(path.trim());
            }
        }

        Self::new_default()
    }

    /// Create a new connection in the default data directory
    /// This uses ~/Documents/Canaan Ledger, but checks for a redirect file first
    pub fn new_default() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        let default_data_dir = home_dir.join("Documents").join(DEFAULT_DIRECTORY_NAME);

        Self::new(Self::follow_redirect(default_data_dir))
    }

    /// Resolve the redirect file inside `default_dir`, falling back to `default_dir`
    pub fn follow_redirect(default_dir: PathBuf) -> PathBuf {
        let redirect_file = default_dir.join(REDIRECT_FILE_NAME);

        if !redirect_file.exists() {
            debug!("No redirect file found, using data directory: {}", default_dir.display());
            return default_dir;
        }

        match fs::read_to_string(&redirect_file) {
            Ok(redirected_path) => {
                let path = PathBuf::from(redirected_path.trim());
                if path.exists() {
                    info!("Found redirect file, using data directory: {}", path.display());
                    path
                } else {
                    warn!(
                        "Redirect file points to non-existent directory: {}. Using default.",
                        path.display()
                    );
                    default_dir
                }
            }
            Err(e) => {
                error!("Failed to read redirect file: {}. Using default directory.", e);
                default_dir
            }
        }
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the JSON document holding `key`
    pub fn document_path(&self, key: &str) -> Result<PathBuf> {
        if !Self::is_valid_key(key) {
            return Err(anyhow::anyhow!("Invalid storage key: {:?}", key));
        }
        Ok(self.base_directory.join(format!("{}.json", key)))
    }

    /// Keys become file names, so only a conservative character set is allowed
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    /// Write `content` to `path` through a temp file and rename
    pub fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
            info!("Recreated data directory: {}", self.base_directory.display());
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("rename {} to {}", temp_path.display(), path.display()))?;
        Ok(())
    }
}
