//! The navigation router: discovery, binding, and click handling.

use super::errors::NavError;
use super::types::{HIDDEN_MENU_LABEL, MenuItem, PageMap, SIDEBAR_RETRY_DELAY};

/// Seam to whatever renders the sidebar.
///
/// Implementations surface the currently rendered items and accept marker
/// updates (hide, active highlight). The router never touches markup
/// directly.
pub trait SidebarView {
    /// Currently rendered items, in display order. Empty when the sidebar
    /// has not been populated yet.
    fn items(&self) -> Vec<MenuItem>;

    /// Suppress the item with the given label.
    fn hide_item(&mut self, label: &str);

    /// Clear the active marker from all items.
    fn clear_active(&mut self);

    /// Mark the item with the given label as active.
    fn set_active(&mut self, label: &str);
}

/// Seam to whatever performs the actual page change.
pub trait Navigator {
    fn navigate(&mut self, destination: &str);
}

/// Derive the base path for generated URLs from the current document path.
///
/// Pages mounted under the API prefix keep it as their base; everything
/// else gets an empty base. Lets the same routing table serve both mounts
/// without reconfiguration.
pub fn context_path(document_path: &str) -> &'static str {
    let under_api_mount = document_path
        .strip_prefix(super::types::API_MOUNT_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
    if under_api_mount {
        super::types::API_MOUNT_PREFIX
    } else {
        ""
    }
}

/// Sidebar navigation router.
///
/// Owns the routing table and the bound/active bookkeeping for one sidebar.
/// Construct one per page session; re-run [`NavRouter::init`] after the
/// sidebar markup is replaced.
#[derive(Debug)]
pub struct NavRouter {
    pages: PageMap,
    context_path: &'static str,
    bound: Vec<String>,
    active: Option<String>,
}

impl NavRouter {
    pub fn new(pages: PageMap, document_path: &str) -> Self {
        Self {
            pages,
            context_path: context_path(document_path),
            bound: Vec::new(),
            active: None,
        }
    }

    /// Discover sidebar items and bind them. Idempotent.
    ///
    /// When the sidebar has no items yet (this can run before the markup is
    /// injected), waits [`SIDEBAR_RETRY_DELAY`] and re-enters discovery.
    /// Best-effort with no retry bound; callers needing one can wrap this
    /// in a timeout.
    pub async fn init(&mut self, view: &mut dyn SidebarView) {
        loop {
            if self.try_init(view) {
                return;
            }
            tracing::debug!(
                event = "core.nav.sidebar_not_ready",
                retry_ms = SIDEBAR_RETRY_DELAY.as_millis() as u64,
                "Sidebar has no items yet - retrying discovery"
            );
            tokio::time::sleep(SIDEBAR_RETRY_DELAY).await;
        }
    }

    /// Single discovery pass. Returns `false` when the sidebar is empty.
    pub fn try_init(&mut self, view: &mut dyn SidebarView) -> bool {
        let items = view.items();
        if items.is_empty() {
            return false;
        }

        self.bound.clear();
        for item in items {
            let label = item.label.trim();
            if label == HIDDEN_MENU_LABEL {
                view.hide_item(&item.label);
                tracing::debug!(event = "core.nav.item_hidden", label = label);
                continue;
            }
            self.bound.push(label.to_string());
        }

        tracing::info!(
            event = "core.nav.items_bound",
            count = self.bound.len(),
            context_path = self.context_path
        );
        true
    }

    /// Handle a click on a sidebar item.
    ///
    /// Only bound labels are accepted; a label with no route logs a warning
    /// and does nothing. On success the active marker moves to the clicked
    /// item, the destination goes to the navigator, and the destination URL
    /// is returned.
    pub fn handle_click(
        &mut self,
        label: &str,
        view: &mut dyn SidebarView,
        navigator: &mut dyn Navigator,
    ) -> Option<String> {
        let label = label.trim();

        if !self.bound.iter().any(|bound| bound == label) {
            tracing::warn!(
                event = "core.nav.click_unbound_label",
                label = label,
                "Click on a label with no bound handler - ignoring"
            );
            return None;
        }

        match self.resolve_destination(label) {
            Ok(destination) => {
                view.clear_active();
                view.set_active(label);
                self.active = Some(label.to_string());

                tracing::info!(
                    event = "core.nav.navigating",
                    label = label,
                    destination = %destination
                );
                navigator.navigate(&destination);
                Some(destination)
            }
            Err(e) => {
                tracing::warn!(
                    event = "core.nav.route_not_found",
                    label = label,
                    error = %e,
                    "No route mapped for label - ignoring click"
                );
                None
            }
        }
    }

    /// Pure resolution of a label to its destination URL.
    pub fn resolve_destination(&self, label: &str) -> Result<String, NavError> {
        let label = label.trim();
        self.pages
            .resolve(label)
            .map(|target| format!("{}/{}", self.context_path, target))
            .ok_or_else(|| NavError::UnknownLabel {
                label: label.to_string(),
            })
    }

    /// Label currently marked active, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether a label received a click binding during init.
    pub fn is_bound(&self, label: &str) -> bool {
        self.bound.iter().any(|bound| bound == label.trim())
    }

    pub fn context_path(&self) -> &'static str {
        self.context_path
    }
}
