use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "snowcr";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_TABLE: &str = "change_request";
pub const DEFAULT_ADAPTER_ID: &str = "ServiceNow";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub table: String,
    pub adapter_id: String,
}

impl AppConfig {
    /// Stored configuration with `SNOWCR_*` environment variables layered on top.
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Ok(Self::resolve(stored, |key| env::var(key).ok()))
    }

    fn resolve(stored: StoredConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |key: &str, fallback: Option<String>| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .or(fallback.filter(|value| !value.trim().is_empty()))
        };

        Self {
            url: pick("SNOWCR_URL", stored.url),
            username: pick("SNOWCR_USERNAME", stored.username),
            password: pick("SNOWCR_PASSWORD", stored.password),
            table: pick("SNOWCR_TABLE", stored.table).unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            adapter_id: pick("SNOWCR_ADAPTER_ID", stored.adapter_id)
                .unwrap_or_else(|| DEFAULT_ADAPTER_ID.to_string()),
        }
    }
}

/// Values persisted by `snowcr config init`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub table: Option<String>,
    pub adapter_id: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("unable to determine configuration directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
