use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::store::DeletePolicy;

/// Environment variable that overrides the configuration file location
pub const CONFIG_ENV_VAR: &str = "AQUABUILD_CONFIG";

/// User settings for the back office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Policy used when deleting clients, contractors and projects
    pub delete_policy: DeletePolicy,
    /// Whether the store starts with the demo data
    pub seed: bool,
    /// Where `export` writes when no path is given
    pub default_export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delete_policy: DeletePolicy::Orphan,
            seed: true,
            default_export_path: PathBuf::from("aquabuild-export.json"),
        }
    }
}

impl Config {
    /// Loads the configuration from the provided path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Loads the configuration, falling back to defaults if the file does
    /// not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the configuration to the specified path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)?;

        // Ensure parent directories exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, content).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Gets the path to the configuration file
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    // Default to <config dir>/aquabuild/config.yaml
    let config_dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
    Ok(config_dir.join("aquabuild").join("config.yaml"))
}
