//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_WINDOW_SIZE;

/// Environment variable that overrides `[omdb] api_key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb API settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
    /// Pagination bar settings.
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// OMDb API configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OmdbConfig {
    /// API key (overridden by `OMDB_API_KEY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Alternative endpoint (e.g. a local mirror).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Pagination bar configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Maximum number of page buttons visible at once.
    #[serde(default = "default_window_size")]
    pub window_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

const fn default_window_size() -> u32 {
    DEFAULT_WINDOW_SIZE
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if `window_size` is zero.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        if config.pagination.window_size == 0 {
            bail!(
                "invalid {}: pagination.window_size must be at least 1",
                path.display()
            );
        }
        Ok(config)
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Resolves the API key: `env_value` (from `OMDB_API_KEY`) wins over the file.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source provides a non-empty key.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String> {
        env_value
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.omdb
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
            .with_context(|| {
                format!("{API_KEY_ENV} environment variable or [omdb] api_key in config.toml is required")
            })
    }
}
