use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DataMineError, Result};

pub const DEFAULT_BASE_URL: &str = "https://datamine.cmegroup.com/cme/api/v1";

/// Credentials and endpoint used for every DataMine request.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct DataMineConfig {
    pub login: String,
    pub key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl DataMineConfig {
    pub fn new(login: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            key: key.into(),
            base_url: default_base_url(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);

        let text = fs::read_to_string(path).map_err(|source| DataMineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: DataMineConfig =
            serde_json::from_str(&text).map_err(|source| DataMineError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/datamine/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("datamine").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.login.is_empty() {
            return Err(DataMineError::Config("login is empty".into()));
        }

        if self.key.is_empty() {
            return Err(DataMineError::Config("key is empty".into()));
        }

        reqwest::Url::parse(&self.base_url).map_err(|e| DataMineError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for DataMineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataMineConfig")
            .field("login", &self.login)
            .field("key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}
