//! Configuration for the page orchestration layer.
//!
//! Two unrelated sources live here:
//!
//! - [`types`] / [`loading`] - the local TOML configuration hierarchy
//!   (`~/.opsboard/config.toml`, then `./.opsboard/config.toml`) carrying
//!   the config-service base URL and the current document path.
//! - [`remote`] - the client for the dashboard's system-config REST API,
//!   which drives auto-refresh settings at page init.

pub mod loading;
pub mod remote;
pub mod types;

pub use loading::load_hierarchy;
pub use types::OpsboardConfig;
