//! Analytics opt-out backed by the Preference Store

use aliasdash_core::analytics::{decide, AnalyticsDecision, OPT_OUT_MARKER};
use aliasdash_core::preferences::keys;
use aliasdash_core::{PreferenceValue, Preferences};

/// Whether the analytics loader should run on `host`.
pub async fn analytics_decision(prefs: &dyn Preferences, host: &str) -> AnalyticsDecision {
    let opt_out = prefs.get(keys::ANALYTICS_IGNORE).await;
    let decision = decide(host, opt_out.as_ref());
    tracing::debug!(host, ?decision, "analytics decision");
    decision
}

/// Opt out of analytics on this origin.
pub async fn opt_out(prefs: &dyn Preferences) -> bool {
    prefs
        .set(
            keys::ANALYTICS_IGNORE,
            &PreferenceValue::from(OPT_OUT_MARKER),
            None,
        )
        .await
}

/// Remove a previous opt-out.
pub async fn opt_in(prefs: &dyn Preferences) {
    prefs.delete(keys::ANALYTICS_IGNORE).await;
}
