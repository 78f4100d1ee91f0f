//! Resolution of remote values into refresh settings.

use std::time::Duration;

use crate::config::remote::{
    AUTO_REFRESH_KEY, ConfigSource, ConfigValue, REFRESH_INTERVAL_KEY, RemoteConfigError,
};

/// Interval used when the remote value is absent, unparsable, or non-positive.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSettings {
    pub enabled: bool,
    pub interval: Duration,
}

impl RefreshSettings {
    /// Settings used when configuration could not be loaded.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Resolve remote values into settings.
    ///
    /// Auto-refresh is on only when the flag call succeeded and its value is
    /// exactly `"true"`. The interval falls back to 30 seconds unless the
    /// interval call succeeded and parses to a positive integer.
    pub fn resolve(enabled: &ConfigValue, interval: &ConfigValue) -> Self {
        Self {
            enabled: enabled.is_ok() && enabled.data == "true",
            interval: resolve_interval(interval),
        }
    }
}

fn resolve_interval(value: &ConfigValue) -> Duration {
    if value.is_ok()
        && let Ok(seconds) = value.data.trim().parse::<i64>()
        && seconds > 0
    {
        return Duration::from_secs(seconds as u64);
    }
    DEFAULT_REFRESH_INTERVAL
}

/// Fetch both refresh-related values concurrently and resolve them.
///
/// All-or-nothing: if either fetch fails the whole load fails and the
/// caller treats the feature as disabled. No retry is attempted.
pub async fn load_settings<S: ConfigSource>(source: &S) -> Result<RefreshSettings, RemoteConfigError> {
    let (enabled, interval) = tokio::try_join!(
        source.get_value(AUTO_REFRESH_KEY),
        source.get_value(REFRESH_INTERVAL_KEY)
    )?;

    Ok(RefreshSettings::resolve(&enabled, &interval))
}
