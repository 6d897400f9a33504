//! API key storage.
//!
//! The key lives in `<user config dir>/gemini-cli/config.json` as
//! `{"api_key": "..."}`, readable only by the owning user.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeminiCliError, Result};

/// Directory created under the platform config dir.
pub const APP_DIR_NAME: &str = "gemini-cli";
/// File name of the credential file.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// On-disk credential format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    /// The Gemini API key
    #[serde(default)]
    pub api_key: String,
}

/// Reads and writes the API key file.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    /// Key store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Key store at the per-user default location.
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| {
            GeminiCliError::config(APP_DIR_NAME, "failed to get user config directory")
        })?;
        Ok(Self::at(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)))
    }

    /// Path of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `api_key`, replacing any existing file, and returns the path used.
    pub fn store(&self, api_key: &str) -> Result<PathBuf> {
        if api_key.trim().is_empty() {
            return Err(GeminiCliError::validation("API key must not be empty"));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_private_dir(parent)?;
        }

        let data = serde_json::to_string_pretty(&StoredConfig {
            api_key: api_key.to_string(),
        })?;
        write_private(&self.path, data.as_bytes())?;

        debug!(path = %self.path.display(), "stored API key");
        Ok(self.path.clone())
    }

    /// Reads the stored API key.
    pub fn load(&self) -> Result<String> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(GeminiCliError::ConfigNotFound {
                    path: self.path.clone(),
                })
            }
            Err(e) => {
                return Err(GeminiCliError::config(
                    &self.path,
                    format!("failed to read config file: {}", e),
                ))
            }
        };

        let config: StoredConfig = serde_json::from_str(&data).map_err(|e| {
            GeminiCliError::config(&self.path, format!("failed to parse config file: {}", e))
        })?;

        if config.api_key.trim().is_empty() {
            return Err(GeminiCliError::config(
                &self.path,
                "API key not found in config file",
            ));
        }

        debug!(path = %self.path.display(), "loaded API key");
        Ok(config.api_key)
    }
}

fn create_private_dir(dir: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new()
            .recursive(true)
            .mode(0o700)
            .create(dir)?;
    }
    #[cfg(not(unix))]
    fs::create_dir_all(dir)?;
    Ok(())
}

fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        // mode() only applies on creation
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(data)?;
    }
    #[cfg(not(unix))]
    fs::write(path, data)?;
    Ok(())
}
