//! Preference Store fallback, theme cookie and analytics opt-out

use std::sync::Arc;

use aliasdash_app::analytics::{analytics_decision, opt_in, opt_out};
use aliasdash_app::ThemeController;
use aliasdash_core::analytics::AnalyticsDecision;
use aliasdash_core::cookie::find_cookie;
use aliasdash_core::effects::{CookieEffects, TimeEffects};
use aliasdash_core::preferences::keys;
use aliasdash_core::theme::Theme;
use aliasdash_core::{PreferenceStore, PreferenceValue, Preferences};
use aliasdash_effects::CookieJarHandler;
use aliasdash_testkit::*;
use chrono::Duration;

fn jar(clock: &Arc<ManualClock>) -> Arc<CookieJarHandler> {
    let clock: Arc<dyn TimeEffects> = clock.clone();
    Arc::new(CookieJarHandler::in_memory(clock))
}

#[tokio::test]
async fn test_disabled_storage_uses_cookies() {
    let clock = Arc::new(ManualClock::new());
    let cookies = jar(&clock);
    let local = Arc::new(UnavailableStorage::new());
    let prefs = PreferenceStore::new(local.clone(), cookies.clone(), clock.clone());

    assert!(prefs.set("showStats", &PreferenceValue::Bool(true), None).await);
    assert_eq!(
        prefs.get("showStats").await,
        Some(PreferenceValue::Bool(true))
    );
    let jar_string = cookies.cookie_string().await.unwrap();
    assert_eq!(find_cookie(&jar_string, "showStats"), Some("true"));
    assert_eq!(local.operations(), 0);

    prefs.delete("showStats").await;
    assert_eq!(prefs.get("showStats").await, None);
}

#[tokio::test]
async fn test_failing_storage_falls_back_per_operation() {
    let clock = Arc::new(ManualClock::new());
    let cookies = jar(&clock);
    let prefs = PreferenceStore::new(Arc::new(FlakyStorage::new()), cookies.clone(), clock.clone());

    assert!(prefs.set("note", &PreferenceValue::from("hello"), Some(2)).await);
    assert_eq!(prefs.get("note").await, Some(PreferenceValue::from("hello")));

    clock.advance(Duration::days(3));
    assert_eq!(prefs.get("note").await, None);
}

#[tokio::test]
async fn test_cookie_fallback_keeps_separators_in_values() {
    let clock = Arc::new(ManualClock::new());
    let cookies = jar(&clock);
    let prefs = PreferenceStore::new(Arc::new(UnavailableStorage::new()), cookies.clone(), clock.clone());

    assert!(prefs.set("k", &PreferenceValue::from("a; b"), None).await);
    assert!(prefs.set("pct", &PreferenceValue::from("100%3B"), None).await);
    assert_eq!(prefs.get("k").await, Some(PreferenceValue::from("a; b")));
    assert_eq!(prefs.get("pct").await, Some(PreferenceValue::from("100%3B")));

    let jar_string = cookies.cookie_string().await.unwrap();
    assert_eq!(find_cookie(&jar_string, "k"), Some("a%3B b"));
}

#[tokio::test]
async fn test_cookie_fallback_accepts_very_long_lifetimes() {
    let clock = Arc::new(ManualClock::new());
    let cookies = jar(&clock);
    let prefs = PreferenceStore::new(Arc::new(UnavailableStorage::new()), cookies, clock.clone());

    assert!(prefs.set("k", &PreferenceValue::from("v"), Some(100_000_000)).await);
    assert!(prefs.set("max", &PreferenceValue::from("v"), Some(i64::MAX)).await);
    clock.advance(Duration::days(365 * 100));
    assert_eq!(prefs.get("k").await, Some(PreferenceValue::from("v")));
    assert_eq!(prefs.get("max").await, Some(PreferenceValue::from("v")));
}

#[tokio::test]
async fn test_rejected_values_are_not_stored() {
    let prefs = memory_preferences();

    assert!(!prefs.set("", &PreferenceValue::Bool(true), None).await);
    assert!(!prefs.set("k", &PreferenceValue::from(""), None).await);
    assert_eq!(prefs.get("k").await, None);
}

#[tokio::test]
async fn test_theme_toggle_persists_cookie() {
    let clock = Arc::new(ManualClock::new());
    let cookies = jar(&clock);
    let theme = ThemeController::new(cookies.clone(), clock.clone(), "app.example.com", true);

    assert_eq!(theme.current().await, Theme::Light);
    assert_eq!(theme.toggle().await.unwrap(), Theme::Dark);
    assert_eq!(theme.current().await, Theme::Dark);
    let jar_string = cookies.cookie_string().await.unwrap();
    assert_eq!(find_cookie(&jar_string, "dark-mode"), Some("true"));

    clock.advance(Duration::days(31));
    assert_eq!(theme.current().await, Theme::Light);
}

#[tokio::test]
async fn test_analytics_opt_out_and_back_in() {
    let prefs = memory_preferences();
    let host = "app.simplelogin.io";

    assert_eq!(
        analytics_decision(prefs.as_ref(), "localhost").await,
        AnalyticsDecision::NotProduction
    );
    assert!(analytics_decision(prefs.as_ref(), host).await.is_enabled());

    assert!(opt_out(prefs.as_ref()).await);
    assert_eq!(
        prefs.get(keys::ANALYTICS_IGNORE).await,
        Some(PreferenceValue::from("t"))
    );
    assert_eq!(
        analytics_decision(prefs.as_ref(), host).await,
        AnalyticsDecision::OptedOut
    );

    opt_in(prefs.as_ref()).await;
    assert!(analytics_decision(prefs.as_ref(), host).await.is_enabled());
}
