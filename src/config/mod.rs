//! User preferences persisted next to the state document.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    currency::LocaleConfig,
    errors::{CoreError, Result},
    storage::{
        json_backend::{tmp_path, write_atomic},
        JsonFileStore,
    },
    utils::paths,
};

const DEFAULT_STATE_FILE: &str = "state.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: LocaleConfig,
    /// Overrides the application data directory for the state document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub state_file: String,
    /// Hide monetary figures behind a placeholder until revealed.
    pub hide_values: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: LocaleConfig::default(),
            data_dir: None,
            state_file: DEFAULT_STATE_FILE.into(),
            hide_values: false,
        }
    }
}

impl Config {
    pub fn state_path(&self) -> PathBuf {
        let dir = self.data_dir.clone().unwrap_or_else(paths::app_data_dir);
        dir.join(&self.state_file)
    }

    pub fn state_store(&self) -> JsonFileStore {
        JsonFileStore::new(self.state_path())
    }
}

/// Handles persistence of [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn new_default() -> Self {
        Self::new(paths::config_file_in(&paths::app_data_dir()))
    }

    pub fn with_base_dir(base: &Path) -> Result<Self> {
        paths::ensure_dir(base)?;
        Ok(Self::new(paths::config_file_in(base)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config, returning defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data)
            .map_err(|err| CoreError::Config(format!("{}: {}", self.path.display(), err)))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| CoreError::Config(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
