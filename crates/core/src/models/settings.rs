use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::storage::traits::PersistencePolicy;

/// Directory name used under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "stock-dashboard";

/// User-configurable settings, read from `config.toml`.
///
/// Every field has a default so a partial (or missing) file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the prediction service (no trailing `/api`).
    pub api_base_url: String,

    /// Exchange used when a search does not name one (e.g., "NSE", "BSE").
    pub default_exchange: String,

    /// Per-request timeout for the prediction service.
    pub request_timeout_secs: u64,

    /// How many headlines to ask the news endpoint for.
    pub news_article_count: u32,

    /// Storage slot that holds the persisted portfolio.
    pub storage_key: String,

    /// Where the portfolio slot lives. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Write the portfolio even when the last holding was removed.
    pub persist_empty_portfolio: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            default_exchange: "NSE".to_string(),
            request_timeout_secs: 30,
            news_article_count: 5,
            storage_key: "portfolio".to_string(),
            data_dir: None,
            persist_empty_portfolio: true,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from the default location, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load_or_default() -> Self {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                match Self::load(&path) {
                    Ok(settings) => return settings,
                    Err(e) => log::warn!("Ignoring config at {}: {e}", path.display()),
                }
            }
        }
        Settings::default()
    }

    /// `<config dir>/stock-dashboard/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR_NAME).join("config.toml"))
    }

    /// Write settings as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The configured data dir, or `<data dir>/stock-dashboard`.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join(APP_DIR_NAME)))
    }

    #[must_use]
    pub fn persistence_policy(&self) -> PersistencePolicy {
        if self.persist_empty_portfolio {
            PersistencePolicy::Always
        } else {
            PersistencePolicy::SkipEmpty
        }
    }
}
