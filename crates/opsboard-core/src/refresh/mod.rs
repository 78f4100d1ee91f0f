//! Auto-refresh scheduling for dashboard pages.
//!
//! On page init two values are fetched concurrently from the system-config
//! API: whether auto-refresh is on, and how often it fires. The scheduler
//! owns the single recurring timer and the registered callback; starting it
//! again always replaces the previous timer, and dropping the scheduler
//! tears the timer down with the session.

pub mod scheduler;
pub mod settings;

pub use scheduler::{RefreshCallback, RefreshScheduler};
pub use settings::{DEFAULT_REFRESH_INTERVAL, RefreshSettings, load_settings};
