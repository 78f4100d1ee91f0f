use std::time::Duration;

/// Menu label whose item is feature-flagged out of the sidebar.
pub const HIDDEN_MENU_LABEL: &str = "CMDB";

/// Path prefix the application is mounted under when served via the API
/// gateway. Pages under it get `/api`-prefixed destinations.
pub const API_MOUNT_PREFIX: &str = "/api";

/// Delay before re-scanning a sidebar that has not been populated yet.
pub const SIDEBAR_RETRY_DELAY: Duration = Duration::from_millis(500);

/// One clickable sidebar entry, identified by its trimmed label text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// One routing table entry: menu label → relative destination.
///
/// An empty target denotes the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRoute {
    pub label: String,
    pub target: String,
}

impl PageRoute {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// Ordered routing table. Labels are expected unique; resolution is
/// first-match-wins on the exact trimmed label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMap {
    routes: Vec<PageRoute>,
}

impl PageMap {
    pub fn new(routes: Vec<PageRoute>) -> Self {
        Self { routes }
    }

    /// The routing table the dashboard ships with.
    pub fn standard() -> Self {
        Self::new(vec![
            PageRoute::new("总览", ""),
            PageRoute::new("视图", "视图.html"),
            PageRoute::new("监控", "监控.html"),
            PageRoute::new("告警", "告警.html"),
            PageRoute::new("配置", "配置.html"),
            PageRoute::new("CMDB", "cmdb.html"),
        ])
    }

    /// Resolve a trimmed label to its relative target.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|route| route.label == label)
            .map(|route| route.target.as_str())
    }

    pub fn routes(&self) -> &[PageRoute] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_map_has_landing_page() {
        let map = PageMap::standard();
        assert_eq!(map.resolve("总览"), Some(""));
    }

    #[test]
    fn test_resolve_is_exact_match() {
        let map = PageMap::standard();
        assert_eq!(map.resolve("视图"), Some("视图.html"));
        assert_eq!(map.resolve("视 图"), None);
        assert_eq!(map.resolve(""), None);
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let map = PageMap::new(vec![
            PageRoute::new("监控", "first.html"),
            PageRoute::new("监控", "second.html"),
        ]);
        assert_eq!(map.resolve("监控"), Some("first.html"));
    }

    #[test]
    fn test_unknown_label_resolves_to_none() {
        let map = PageMap::standard();
        assert_eq!(map.resolve("报表"), None);
    }
}
