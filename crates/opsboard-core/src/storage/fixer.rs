//! One-time repair of stale avatar URL prefixes.
//!
//! Avatars used to be served from `/upload/`; they now live under
//! `/api/upload/`. Values written by older builds still carry the legacy
//! prefix. The pass here rewrites them in place and reports what changed
//! so loaded components can react without re-reading storage.
//!
//! The legacy prefix is a strict prefix of the new one, so a rewrite is
//! only applied to values that start with the old prefix and do not already
//! start with the new one. Running the pass repeatedly is a no-op once
//! storage is consistent.

use crate::events::PageEvent;

use super::errors::StorageError;
use super::store::StateStore;

/// Historical URL prefix for uploaded assets.
pub const LEGACY_UPLOAD_PREFIX: &str = "/upload/";

/// Current API-mounted URL prefix for uploaded assets.
pub const UPLOAD_PREFIX: &str = "/api/upload/";

/// Store key holding the bare avatar URL.
pub const USER_AVATAR_KEY: &str = "userAvatar";

/// Store key holding the serialized user record (JSON with an `avatar` field).
pub const USER_INFO_KEY: &str = "userInfo";

/// Rewrite a legacy-prefixed URL, or `None` if the value is already fine.
fn rewrite_legacy_prefix(value: &str) -> Option<String> {
    if value.starts_with(UPLOAD_PREFIX) {
        return None;
    }
    value
        .strip_prefix(LEGACY_UPLOAD_PREFIX)
        .map(|rest| format!("{}{}", UPLOAD_PREFIX, rest))
}

/// Idempotent repair pass over `userAvatar` and `userInfo`.
///
/// Returns an [`PageEvent::AvatarUpdated`] event when either key was
/// rewritten, carrying the (possibly updated) avatar value. A malformed
/// `userInfo` record is logged and left untouched; only store write
/// failures propagate.
pub fn fix_avatar_urls(store: &mut dyn StateStore) -> Result<Vec<PageEvent>, StorageError> {
    let mut changed = false;
    let mut info_avatar: Option<String> = None;

    if let Some(avatar) = store.get(USER_AVATAR_KEY)
        && let Some(fixed) = rewrite_legacy_prefix(&avatar)
    {
        store.set(USER_AVATAR_KEY, &fixed)?;
        tracing::info!(
            event = "core.storage.user_avatar_fixed",
            from = %avatar,
            to = %fixed
        );
        changed = true;
    }

    if let Some(raw) = store.get(USER_INFO_KEY) {
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(mut info) => {
                if let Some(avatar) = info.get("avatar").and_then(|v| v.as_str())
                    && let Some(fixed) = rewrite_legacy_prefix(avatar)
                {
                    info["avatar"] = serde_json::Value::String(fixed.clone());
                    let serialized = serde_json::to_string(&info).map_err(|e| {
                        StorageError::SerializeFailed {
                            message: e.to_string(),
                        }
                    })?;
                    store.set(USER_INFO_KEY, &serialized)?;
                    tracing::info!(event = "core.storage.user_info_avatar_fixed", to = %fixed);
                    info_avatar = Some(fixed);
                    changed = true;
                }
            }
            Err(e) => {
                // Non-fatal: the record was written elsewhere and may be
                // repaired by its owner. Leave it untouched.
                tracing::warn!(
                    event = "core.storage.user_info_parse_failed",
                    error = %e,
                    "userInfo is not valid JSON - skipping avatar repair"
                );
            }
        }
    }

    if changed {
        let avatar = store
            .get(USER_AVATAR_KEY)
            .or(info_avatar)
            .unwrap_or_default();
        return Ok(vec![PageEvent::AvatarUpdated { avatar }]);
    }

    Ok(Vec::new())
}

/// Public entry point for the repair pass.
///
/// Safe to call multiple times; once storage is in the fixed format the
/// pass makes no further writes and emits no events.
pub fn check_and_fix(store: &mut dyn StateStore) -> Result<Vec<PageEvent>, StorageError> {
    fix_avatar_urls(store)
}
