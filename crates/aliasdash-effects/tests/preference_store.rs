//! Preference Store over the production handlers

use aliasdash_core::effects::{CookieEffects, TimeEffects};
use aliasdash_core::preferences::keys;
use aliasdash_core::{PreferenceStore, PreferenceValue, Preferences};
use aliasdash_effects::{CookieJarHandler, FilesystemStorageHandler, SystemTimeHandler};
use std::sync::Arc;
use tempfile::TempDir;

fn clock() -> Arc<dyn TimeEffects> {
    Arc::new(SystemTimeHandler::new())
}

fn store_at(
    prefs_dir: std::path::PathBuf,
) -> (
    PreferenceStore<FilesystemStorageHandler, CookieJarHandler>,
    Arc<CookieJarHandler>,
) {
    let cookies = Arc::new(CookieJarHandler::in_memory(clock()));
    let store = PreferenceStore::new(
        Arc::new(FilesystemStorageHandler::new(prefs_dir)),
        cookies.clone(),
        clock(),
    );
    (store, cookies)
}

#[tokio::test]
async fn test_primary_round_trip_with_coercion() {
    let dir = TempDir::new().unwrap();
    let (store, cookies) = store_at(dir.path().join("prefs"));

    assert!(store.set(keys::SHOW_FILTER, &true.into(), None).await);
    assert!(store.set("answer", &"42".into(), None).await);

    assert_eq!(store.get(keys::SHOW_FILTER).await, Some(PreferenceValue::Bool(true)));
    assert_eq!(store.get("answer").await, Some(PreferenceValue::from("42")));
    assert!(store.flag(keys::SHOW_FILTER).await);

    // primary path never touches cookies
    assert_eq!(cookies.cookie_string().await.unwrap(), "");

    store.delete(keys::SHOW_FILTER).await;
    assert_eq!(store.get(keys::SHOW_FILTER).await, None);
    assert!(!store.flag(keys::SHOW_FILTER).await);
}

#[tokio::test]
async fn test_empty_key_or_value_is_rejected_silently() {
    let dir = TempDir::new().unwrap();
    let (store, _) = store_at(dir.path().join("prefs"));

    assert!(!store.set("", &"v".into(), None).await);
    assert!(!store.set("k", &"".into(), None).await);
    assert_eq!(store.get("k").await, None);
}

#[tokio::test]
async fn test_unavailable_primary_falls_back_to_cookies() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let (store, cookies) = store_at(blocker);

    assert!(store.set(keys::SHOW_STATS, &false.into(), Some(7)).await);
    assert_eq!(cookies.cookie_string().await.unwrap(), "showStats=false");
    assert_eq!(store.get(keys::SHOW_STATS).await, Some(PreferenceValue::Bool(false)));

    store.delete(keys::SHOW_STATS).await;
    assert_eq!(store.get(keys::SHOW_STATS).await, None);
    assert_eq!(cookies.cookie_string().await.unwrap(), "");
}

#[tokio::test]
async fn test_primary_failing_mid_session_falls_back_per_call() {
    let dir = TempDir::new().unwrap();
    let prefs = dir.path().join("prefs");
    let (store, cookies) = store_at(prefs.clone());

    // The directory probes fine, but this key's file is a directory and
    // cannot be written or read.
    std::fs::create_dir_all(prefs.join("showFilter.pref")).unwrap();

    assert!(store.set(keys::SHOW_FILTER, &true.into(), None).await);
    assert_eq!(cookies.cookie_string().await.unwrap(), "showFilter=true");
    assert_eq!(store.get(keys::SHOW_FILTER).await, Some(PreferenceValue::Bool(true)));

    // other keys still use the primary backend
    assert!(store.set(keys::SHOW_STATS, &true.into(), None).await);
    assert!(prefs.join("showStats.pref").exists());
}
