//! Dark-mode toggle

use std::sync::Arc;

use aliasdash_core::effects::{CookieEffects, TimeEffects};
use aliasdash_core::theme::Theme;
use aliasdash_core::Result;

/// Reads and flips the `dark-mode` cookie of one host.
pub struct ThemeController {
    cookies: Arc<dyn CookieEffects>,
    clock: Arc<dyn TimeEffects>,
    host: String,
    secure: bool,
}

impl ThemeController {
    /// Controller for `host`; `secure` marks the cookie `Secure` (https pages).
    pub fn new(
        cookies: Arc<dyn CookieEffects>,
        clock: Arc<dyn TimeEffects>,
        host: impl Into<String>,
        secure: bool,
    ) -> Self {
        Self {
            cookies,
            clock,
            host: host.into(),
            secure,
        }
    }

    /// Theme currently selected. An unreadable jar means the default theme.
    pub async fn current(&self) -> Theme {
        match self.cookies.cookie_string().await {
            Ok(jar) => Theme::from_cookie_string(&jar),
            Err(e) => {
                tracing::warn!("cannot read theme cookie: {}", e);
                Theme::default()
            }
        }
    }

    /// Switch to the other theme and persist it for 30 days.
    pub async fn toggle(&self) -> Result<Theme> {
        let next = self.current().await.toggled();
        let cookie = next.to_cookie(self.clock.now(), &self.host, self.secure);
        self.cookies.set_cookie(&cookie).await?;
        tracing::info!(theme = next.as_str(), "theme switched");
        Ok(next)
    }
}
