//! Per-session wiring of the page components.

pub mod session;

pub use session::PageSession;
