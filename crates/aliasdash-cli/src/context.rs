//! Handlers wired from the configuration

use std::sync::Arc;

use aliasdash_app::{Dashboard, HttpAliasApi, ThemeController};
use aliasdash_core::effects::TimeEffects;
use aliasdash_core::PreferenceStore;
use aliasdash_effects::{CookieJarHandler, FilesystemStorageHandler, SystemTimeHandler};
use anyhow::Result;

use crate::config::CliConfig;
use crate::notifier::ConsoleNotifier;

/// Preference Store backed by the data directory.
pub type CliPreferences = PreferenceStore<FilesystemStorageHandler, CookieJarHandler>;

/// Everything a command needs.
pub struct Context {
    /// Loaded configuration
    pub config: CliConfig,
    /// Wall clock
    pub clock: Arc<dyn TimeEffects>,
    /// Cookie jar mirrored to `cookies.json`
    pub cookies: Arc<CookieJarHandler>,
    /// Preference Store over `prefs/` and the jar
    pub prefs: Arc<CliPreferences>,
}

impl Context {
    /// Open the cookie jar and persistent storage under `data_dir`.
    pub async fn open(config: CliConfig) -> Result<Self> {
        let clock: Arc<dyn TimeEffects> = Arc::new(SystemTimeHandler::new());
        let cookies = Arc::new(CookieJarHandler::open(config.cookie_file(), clock.clone()).await?);
        let local = Arc::new(FilesystemStorageHandler::new(config.prefs_dir()));

        let mut prefs = PreferenceStore::new(local, cookies.clone(), clock.clone());
        if let Some(domain) = &config.cookie_domain {
            prefs = prefs.with_cookie_domain(domain.clone());
        }
        tracing::debug!(data_dir = %config.data_dir.display(), "context opened");

        Ok(Self {
            config,
            clock,
            cookies,
            prefs: Arc::new(prefs),
        })
    }

    /// Dashboard talking to the configured backend.
    pub fn dashboard(&self) -> Result<Dashboard> {
        if self.config.api_key.is_none() {
            tracing::warn!("no API key configured, requests will be rejected");
        }
        let api = HttpAliasApi::new(&self.config.api_base_url, self.config.api_key.clone())?;
        Ok(Dashboard::new(
            Arc::new(api),
            self.prefs.clone(),
            Arc::new(ConsoleNotifier),
        ))
    }

    /// Theme controller for the backend host.
    pub fn theme(&self) -> ThemeController {
        let host = self
            .config
            .cookie_domain
            .clone()
            .unwrap_or_else(|| self.config.host().to_string());
        ThemeController::new(
            self.cookies.clone(),
            self.clock.clone(),
            host,
            self.config.is_secure(),
        )
    }
}
