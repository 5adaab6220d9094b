//! CLI configuration

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `api_key`.
pub const API_KEY_ENV: &str = "ALIASDASH_API_KEY";

const DEFAULT_API_BASE_URL: &str = "https://app.simplelogin.io";

/// Settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Backend root, e.g. `https://app.simplelogin.io`
    pub api_base_url: String,
    /// API key sent in the `Authentication` header
    pub api_key: Option<String>,
    /// Holds `prefs/` and `cookies.json`
    pub data_dir: PathBuf,
    /// Domain attribute of fallback cookies
    pub cookie_domain: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            data_dir: default_data_dir(),
            cookie_domain: None,
        }
    }
}

impl CliConfig {
    /// Directory of the persistent preference backend.
    pub fn prefs_dir(&self) -> PathBuf {
        self.data_dir.join("prefs")
    }

    /// File backing the cookie jar.
    pub fn cookie_file(&self) -> PathBuf {
        self.data_dir.join("cookies.json")
    }

    /// Host part of `api_base_url`, used as the page host.
    pub fn host(&self) -> &str {
        let rest = self
            .api_base_url
            .split_once("://")
            .map_or(self.api_base_url.as_str(), |(_, rest)| rest);
        let end = rest.find(['/', ':', '?']).unwrap_or(rest.len());
        &rest[..end]
    }

    /// Whether the backend is served over https.
    pub fn is_secure(&self) -> bool {
        self.api_base_url.starts_with("https://")
    }

    /// Take `api_key` from the environment value when it is set.
    pub fn with_env_api_key(mut self, value: Option<String>) -> Self {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".aliasdash")
}

/// `~/.aliasdash/config.toml`
pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.toml")
}

/// Read the configuration at `path`; a missing file means defaults.
pub fn load_config(path: &Path) -> Result<CliConfig> {
    let config = read_config_file(path)?;
    Ok(config.with_env_api_key(std::env::var(API_KEY_ENV).ok()))
}

fn read_config_file(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CliConfig::default());
    }

    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: CliConfig = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}
