//! Config file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::codes::ColumnLayout;
use crate::errors::IcdError;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "ICDSYNC_CONFIG";

pub const DEFAULT_CMS_URL: &str = "https://www.cms.gov/medicare/coding/icd10";

/// icdsync configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page to start searching for the latest ICD-10 release
    pub cms_url: String,
    /// Directory generated files are written to
    pub dest_path: PathBuf,
    /// Inserted between the output kind and the year in file names
    pub file_name_base: String,
    /// Subtracted from the epoch day count for the header day index
    pub day_index_offset: i64,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Order file column boundaries
    pub layout: ColumnLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cms_url: DEFAULT_CMS_URL.to_string(),
            dest_path: PathBuf::from("."),
            file_name_base: "Filename_Base_".to_string(),
            day_index_offset: 7182,
            timeout_secs: 60,
            user_agent: concat!("icdsync/", env!("CARGO_PKG_VERSION")).to_string(),
            layout: ColumnLayout::default(),
        }
    }
}

impl Config {
    /// Load configuration from `$ICDSYNC_CONFIG` or the default config file
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, IcdError> {
        let config_file = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_dir().join("config.toml"),
        };

        if !config_file.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_file)
    }

    pub fn load_from(path: &Path) -> Result<Self, IcdError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| IcdError::Config(format!("Failed to read config {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, IcdError> {
        toml::from_str(content).map_err(|e| IcdError::Config(format!("Invalid config TOML: {}", e)))
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("icdsync"))
            .unwrap_or_else(|| PathBuf::from(".icdsync"))
    }
}
