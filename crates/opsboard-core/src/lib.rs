//! opsboard-core: Core library for dashboard page orchestration
//!
//! This library provides the client-side control logic for an operations
//! dashboard: navigation routing, auto-refresh scheduling, and repair of
//! stale client-persisted state. It is used by the headless CLI driver and
//! by any host that embeds a page session.
//!
//! # Main Entry Points
//!
//! - [`page`] - Per-session facade wiring the components together
//! - [`nav`] - Sidebar navigation router and routing table
//! - [`refresh`] - Auto-refresh scheduler and settings resolution
//! - [`storage`] - Client state store and avatar URL repair
//! - [`config`] - Local configuration and the remote config client

pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod nav;
pub mod page;
pub mod refresh;
pub mod storage;

// Re-export commonly used types at crate root for convenience
pub use config::OpsboardConfig;
pub use config::remote::{ConfigSource, ConfigValue, HttpConfigSource};
pub use events::PageEvent;
pub use nav::{MenuItem, NavRouter, Navigator, PageMap, PageRoute, SidebarView};
pub use page::PageSession;
pub use refresh::{
    DEFAULT_REFRESH_INTERVAL, RefreshCallback, RefreshScheduler, RefreshSettings,
};
pub use storage::{FileStore, MemoryStore, StateStore, check_and_fix};

// Re-export logging initialization
pub use logging::init_logging;
