//! The page session: the one object a host holds for a loaded page.
//!
//! Construction wires the storage fixer, the navigation router, and the
//! refresh scheduler together; initialization runs the one-time storage
//! repair, brings up navigation, and loads remote refresh configuration.
//! External page code gets its entry points (`manual_refresh`,
//! `stop_auto_refresh`, `reinit_navigation`, `handle_click`) from this
//! object rather than a shared global namespace.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::remote::ConfigSource;
use crate::events::PageEvent;
use crate::nav::{NavRouter, Navigator, PageMap, SidebarView};
use crate::refresh::{RefreshCallback, RefreshScheduler, RefreshSettings};
use crate::storage::{self, StateStore};

/// Capacity of the session's event channel. Slow subscribers lag rather
/// than block the page.
const EVENT_CHANNEL_CAPACITY: usize = 16;

pub struct PageSession {
    store: Box<dyn StateStore + Send>,
    view: Box<dyn SidebarView + Send>,
    navigator: Box<dyn Navigator + Send>,
    router: NavRouter,
    scheduler: RefreshScheduler,
    events: broadcast::Sender<PageEvent>,
    startup_warnings: Vec<String>,
}

impl PageSession {
    pub fn new(
        store: Box<dyn StateStore + Send>,
        view: Box<dyn SidebarView + Send>,
        navigator: Box<dyn Navigator + Send>,
        pages: PageMap,
        document_path: &str,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            view,
            navigator,
            router: NavRouter::new(pages, document_path),
            scheduler: RefreshScheduler::new(),
            events,
            startup_warnings: Vec::new(),
        }
    }

    /// Bring the page up: run the storage repair once, bind navigation, and
    /// load auto-refresh configuration.
    ///
    /// Repair failures become startup warnings instead of failing the page.
    /// Returns the refresh settings that were applied.
    pub async fn initialize<S: ConfigSource>(
        &mut self,
        source: &S,
        callback: RefreshCallback,
    ) -> RefreshSettings {
        match storage::check_and_fix(self.store.as_mut()) {
            Ok(events) => {
                for event in events {
                    self.publish(event);
                }
            }
            Err(e) => {
                tracing::error!(
                    event = "core.page.storage_repair_failed",
                    error = %e,
                    "Avatar URL repair failed - continuing with stale state"
                );
                self.startup_warnings
                    .push(format!("Storage repair failed: {}", e));
            }
        }

        self.router.init(self.view.as_mut()).await;

        let events = self.events.clone();
        let ticking: RefreshCallback = Arc::new(move || {
            let _ = events.send(PageEvent::RefreshTicked);
            callback();
        });
        self.scheduler.init(source, ticking).await
    }

    /// Handle a click on a sidebar item by label.
    pub fn handle_click(&mut self, label: &str) {
        if let Some(destination) =
            self.router
                .handle_click(label, self.view.as_mut(), self.navigator.as_mut())
        {
            self.publish(PageEvent::NavigationChanged {
                label: label.trim().to_string(),
                destination,
            });
        }
    }

    /// Re-run sidebar discovery and binding, e.g. after the sidebar markup
    /// was replaced.
    pub async fn reinit_navigation(&mut self) {
        self.router.init(self.view.as_mut()).await;
    }

    /// Invoke the refresh callback now, independent of the timer.
    pub fn manual_refresh(&self) {
        self.scheduler.manual_refresh();
    }

    /// Stop the recurring refresh timer. Safe when no timer is running.
    pub fn stop_auto_refresh(&mut self) {
        self.scheduler.stop();
    }

    /// Subscribe to the session's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }

    /// Non-fatal problems collected during initialization.
    pub fn startup_warnings(&self) -> &[String] {
        &self.startup_warnings
    }

    pub fn router(&self) -> &NavRouter {
        &self.router
    }

    pub fn is_auto_refresh_running(&self) -> bool {
        self.scheduler.is_running()
    }

    fn publish(&self, event: PageEvent) {
        tracing::debug!(event = "core.page.event_published", page_event = ?event);
        // Send fails only when no subscriber is listening, which is fine.
        let _ = self.events.send(event);
    }
}
