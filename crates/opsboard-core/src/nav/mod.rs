//! Sidebar navigation routing.
//!
//! A typed routing table (menu label → relative target) drives resolution;
//! the sidebar itself is reached through the [`SidebarView`] seam and the
//! actual page change through [`Navigator`], so route resolution is directly
//! unit-testable without any rendered markup.

pub mod errors;
pub mod router;
pub mod types;

pub use errors::NavError;
pub use router::{NavRouter, Navigator, SidebarView, context_path};
pub use types::{
    API_MOUNT_PREFIX, HIDDEN_MENU_LABEL, MenuItem, PageMap, PageRoute, SIDEBAR_RETRY_DELAY,
};
