use serde::{Deserialize, Serialize};

/// Notifications emitted by page components.
///
/// Each variant describes _what happened_, not what should happen. Failures
/// use the `Result` error channel, not the event stream. Events use owned
/// types so they can be serialized, stored, and sent across boundaries;
/// callers subscribe to the page session's channel to react without polling
/// client storage themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageEvent {
    /// A stale avatar URL in client storage was rewritten. Carries the
    /// repaired avatar value so listeners can update without a re-read.
    AvatarUpdated { avatar: String },
    /// A sidebar click resolved to a destination and navigation was requested.
    NavigationChanged { label: String, destination: String },
    /// The refresh callback fired (timer tick or manual refresh).
    RefreshTicked,
}
