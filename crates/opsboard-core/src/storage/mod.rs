//! Client-persisted state and its consistency repair.
//!
//! The dashboard keeps a small amount of per-user state in a key-value
//! store (`userAvatar`, `userInfo`). Historical builds recorded avatar URLs
//! under `/upload/`; assets have since moved under the API mount. The fixer
//! in this module rewrites the stale prefix once per session.

pub mod errors;
pub mod fixer;
pub mod store;

pub use errors::StorageError;
pub use fixer::{
    LEGACY_UPLOAD_PREFIX, UPLOAD_PREFIX, USER_AVATAR_KEY, USER_INFO_KEY, check_and_fix,
    fix_avatar_urls,
};
pub use store::{FileStore, MemoryStore, StateStore};
