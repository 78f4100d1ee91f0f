//! Console-backed sidebar and navigator for headless sessions.
//!
//! The CLI has no rendered sidebar, so it synthesizes one from the routing
//! table and prints navigation instead of changing a location.

use opsboard_core::{MenuItem, Navigator, PageMap, SidebarView};

/// Sidebar synthesized from the routing table labels.
pub struct ConsoleSidebar {
    items: Vec<MenuItem>,
    hidden: Vec<String>,
    active: Option<String>,
}

impl ConsoleSidebar {
    pub fn from_page_map(pages: &PageMap) -> Self {
        Self {
            items: pages
                .routes()
                .iter()
                .map(|route| MenuItem::new(route.label.clone()))
                .collect(),
            hidden: Vec::new(),
            active: None,
        }
    }
}

impl SidebarView for ConsoleSidebar {
    fn items(&self) -> Vec<MenuItem> {
        self.items.clone()
    }

    fn hide_item(&mut self, label: &str) {
        self.hidden.push(label.to_string());
    }

    fn clear_active(&mut self) {
        self.active = None;
    }

    fn set_active(&mut self, label: &str) {
        self.active = Some(label.to_string());
    }
}

/// Navigator that prints the destination instead of loading it.
#[derive(Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&mut self, destination: &str) {
        println!("navigate: {}", destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sidebar_mirrors_page_map() {
        let sidebar = ConsoleSidebar::from_page_map(&PageMap::standard());
        let labels: Vec<_> = sidebar.items().into_iter().map(|i| i.label).collect();
        assert!(labels.contains(&"总览".to_string()));
        assert!(labels.contains(&"CMDB".to_string()));
    }

    #[test]
    fn test_console_sidebar_records_markers() {
        let mut sidebar = ConsoleSidebar::from_page_map(&PageMap::standard());
        sidebar.hide_item("CMDB");
        sidebar.set_active("总览");
        assert_eq!(sidebar.hidden, vec!["CMDB".to_string()]);
        assert_eq!(sidebar.active.as_deref(), Some("总览"));

        sidebar.clear_active();
        assert!(sidebar.active.is_none());
    }
}
