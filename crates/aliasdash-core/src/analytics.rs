//! Analytics opt-out gate

use crate::preferences::PreferenceValue;

/// Host suffix on which analytics may run.
pub const PRODUCTION_HOST_SUFFIX: &str = "simplelogin.io";

/// Value of the `analytics-ignore` preference that disables analytics.
pub const OPT_OUT_MARKER: &str = "t";

/// Why analytics is or is not loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsDecision {
    /// Production host, no opt-out
    Enabled,
    /// Host is not production
    NotProduction,
    /// User opted out
    OptedOut,
}

impl AnalyticsDecision {
    /// Whether the analytics loader should run.
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// Decide from the page host and the stored opt-out preference.
pub fn decide(host: &str, opt_out: Option<&PreferenceValue>) -> AnalyticsDecision {
    if !host.ends_with(PRODUCTION_HOST_SUFFIX) {
        return AnalyticsDecision::NotProduction;
    }
    match opt_out.and_then(PreferenceValue::as_str) {
        Some(OPT_OUT_MARKER) => AnalyticsDecision::OptedOut,
        _ => AnalyticsDecision::Enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_production_host() {
        assert_eq!(decide("localhost:7777", None), AnalyticsDecision::NotProduction);
    }

    #[test]
    fn test_opt_out() {
        let marker = PreferenceValue::from("t");
        assert_eq!(
            decide("app.simplelogin.io", Some(&marker)),
            AnalyticsDecision::OptedOut
        );
        let other = PreferenceValue::Bool(true);
        assert!(decide("app.simplelogin.io", Some(&other)).is_enabled());
        assert!(decide("app.simplelogin.io", None).is_enabled());
    }
}
