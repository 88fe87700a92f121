use crate::error::SyncError;
use crate::extract::DEFAULT_PERMALINK_BASE;
use crate::sync::DEFAULT_UTC_OFFSET_HOURS;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_KEY_ENV: &str = "GRIST_API_KEY";
pub const DOC_ID_ENV: &str = "GRIST_VEILLE_DOC_ID";

const DEFAULT_API_URL: &str = "https://grist.numerique.gouv.fr/api";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    grist: GristConfig,
    tables: TablesConfig,
    sync: SyncConfig,
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct GristConfig {
    api_url: String,
    doc_id: Option<String>,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl Default for GristConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            doc_id: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct TablesConfig {
    test: String,
    production: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            test: "Test".to_string(),
            production: "Veille".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct SyncConfig {
    utc_offset_hours: i32,
    permalink_base: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            permalink_base: DEFAULT_PERMALINK_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingConfig {
    dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub doc_id: String,
    pub timeout: Duration,
    pub test_table: String,
    pub production_table: String,
    pub utc_offset_hours: i32,
    pub permalink_base: String,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Reads `path` if it exists, then lets the environment override credentials.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_file = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            ConfigFile::default()
        };

        Ok(Self::resolve(config_file, |key| std::env::var(key).ok())?)
    }

    fn resolve(
        config_file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SyncError> {
        let api_key = env(API_KEY_ENV)
            .or(config_file.grist.api_key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                SyncError::Configuration(format!(
                    "The {} environment variable does not exist and no grist.api_key is configured",
                    API_KEY_ENV
                ))
            })?;

        let doc_id = env(DOC_ID_ENV)
            .or(config_file.grist.doc_id)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                SyncError::Configuration(format!(
                    "The {} environment variable does not exist and no grist.doc_id is configured",
                    DOC_ID_ENV
                ))
            })?;

        Ok(Self {
            api_url: config_file.grist.api_url.trim_end_matches('/').to_string(),
            api_key,
            doc_id,
            timeout: Duration::from_secs(config_file.grist.timeout_secs),
            test_table: config_file.tables.test,
            production_table: config_file.tables.production,
            utc_offset_hours: config_file.sync.utc_offset_hours,
            permalink_base: config_file.sync.permalink_base,
            log_dir: config_file.logging.dir.map(PathBuf::from),
        })
    }
}
