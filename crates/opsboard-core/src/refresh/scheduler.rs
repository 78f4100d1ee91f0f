//! The recurring refresh timer and its owner.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::config::remote::ConfigSource;

use super::settings::{RefreshSettings, load_settings};

/// Caller-supplied function invoked on every refresh (timer tick or manual).
pub type RefreshCallback = Arc<dyn Fn() + Send + Sync>;

/// Owns the single refresh timer and the registered callback for one page
/// session.
///
/// Explicitly not shared across sessions: construct one per page, drop it
/// when the page goes away. `start` always replaces any running timer, so
/// at most one is active regardless of how many times it is invoked.
pub struct RefreshScheduler {
    callback: Option<RefreshCallback>,
    interval: Duration,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self {
            callback: None,
            interval: super::settings::DEFAULT_REFRESH_INTERVAL,
            handle: None,
        }
    }

    /// Register the callback and load remote configuration.
    ///
    /// Starts the timer when the remote flag enables it. When either remote
    /// fetch fails the feature silently disables for this session (warn
    /// logged, no retry). Returns the settings that were applied.
    pub async fn init<S: ConfigSource>(
        &mut self,
        source: &S,
        callback: RefreshCallback,
    ) -> RefreshSettings {
        self.callback = Some(callback);

        let settings = match load_settings(source).await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    event = "core.refresh.config_load_failed",
                    error = %e,
                    "Auto-refresh disabled for this session"
                );
                RefreshSettings::disabled()
            }
        };

        if settings.enabled {
            self.start(settings.interval);
        } else {
            tracing::info!(event = "core.refresh.disabled");
        }

        settings
    }

    /// Start the recurring timer, replacing any previous one.
    ///
    /// The first callback invocation happens one full interval after start.
    /// No-op (with a warning) when no callback is registered.
    pub fn start(&mut self, interval: Duration) {
        self.clear_timer();

        let Some(callback) = self.callback.clone() else {
            tracing::warn!(
                event = "core.refresh.start_without_callback",
                "No refresh callback registered - timer not started"
            );
            return;
        };

        self.interval = interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; consume it so callbacks
            // fire on the interval, not at start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                callback();
            }
        });
        self.handle = Some(handle);

        tracing::info!(
            event = "core.refresh.timer_started",
            interval_secs = interval.as_secs()
        );
    }

    /// Stop the timer and reset its handle. Safe to call when idle.
    pub fn stop(&mut self) {
        if self.clear_timer() {
            tracing::info!(event = "core.refresh.timer_stopped");
        }
    }

    /// Invoke the registered callback immediately. Does not touch the timer.
    pub fn manual_refresh(&self) {
        match &self.callback {
            Some(callback) => {
                tracing::debug!(event = "core.refresh.manual_refresh");
                callback();
            }
            None => {
                tracing::warn!(
                    event = "core.refresh.manual_refresh_without_callback",
                    "No refresh callback registered - nothing to invoke"
                );
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Interval of the most recently started timer.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn clear_timer(&mut self) -> bool {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            return true;
        }
        false
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshScheduler {
    // Session-lifetime analog of clearing the timer on page unload.
    fn drop(&mut self) {
        self.clear_timer();
    }
}
