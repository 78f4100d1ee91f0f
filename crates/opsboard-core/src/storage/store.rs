//! File-backed key-value store for client state.
//!
//! Mirrors what the browser build kept in local storage: a flat map of
//! string keys to string values, persisted as JSON. Execution is
//! single-threaded per session; each `set` is a read-modify-write over the
//! in-memory map followed by a full rewrite of the file, which keeps
//! per-key updates atomic from the caller's point of view.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::errors::StorageError;

/// String key-value storage with read-then-conditionally-write semantics.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value and persist it.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Client state persisted to `~/.opsboard/state.json`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    load_error: Option<String>,
}

impl FileStore {
    /// Open the store at the default path (honors `OPSBOARD_STATE_FILE`).
    pub fn open_default() -> Self {
        Self::open(state_file_path())
    }

    /// Open a store at an explicit path.
    ///
    /// A missing file yields an empty store. A corrupted file yields an
    /// empty store with `load_error` set (with the error logged); existing
    /// state is only overwritten once a caller persists a new value.
    pub fn open(path: PathBuf) -> Self {
        if !path.exists() {
            return Self {
                path,
                entries: BTreeMap::new(),
                load_error: None,
            };
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => Self {
                    path,
                    entries,
                    load_error: None,
                },
                Err(e) => {
                    tracing::error!(
                        event = "core.storage.state_parse_failed",
                        path = %path.display(),
                        error = %e,
                        "State file exists but contains invalid JSON - client state lost"
                    );
                    let load_error = Some(format!(
                        "State file corrupted ({}). Delete {} to reset.",
                        e,
                        path.display()
                    ));
                    Self {
                        path,
                        entries: BTreeMap::new(),
                        load_error,
                    }
                }
            },
            Err(e) => {
                tracing::error!(
                    event = "core.storage.state_read_failed",
                    path = %path.display(),
                    error = %e
                );
                let load_error = Some(format!(
                    "Failed to read state file: {}. Check permissions on {}",
                    e,
                    path.display()
                ));
                Self {
                    path,
                    entries: BTreeMap::new(),
                    load_error,
                }
            }
        }
    }

    /// Error encountered while loading, if any (for startup diagnostics).
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailed {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            StorageError::SerializeFailed {
                message: e.to_string(),
            }
        })?;

        std::fs::write(&self.path, json).map_err(|e| StorageError::WriteFailed {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// In-memory store for tests and embedders without durable state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn state_file_path() -> PathBuf {
    // Allow override via env var for testing.
    if let Ok(path_str) = std::env::var("OPSBOARD_STATE_FILE")
        && !path_str.is_empty()
    {
        return PathBuf::from(path_str);
    }

    match dirs::home_dir() {
        Some(home) => home.join(".opsboard").join("state.json"),
        None => {
            tracing::error!(
                event = "core.storage.home_dir_not_found",
                fallback = ".",
                "Could not determine home directory - using current directory as fallback"
            );
            PathBuf::from(".").join(".opsboard").join("state.json")
        }
    }
}

/// Test utilities for state persistence.
///
/// Public so downstream crates can use the env lock/guard in their tests.
#[doc(hidden)]
pub mod test_helpers {
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify OPSBOARD_STATE_FILE env var.
    pub static STATE_FILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard that removes OPSBOARD_STATE_FILE env var on drop.
    pub struct StateFileEnvGuard;

    impl StateFileEnvGuard {
        pub fn new(path: &std::path::Path) -> Self {
            // SAFETY: Caller must hold STATE_FILE_ENV_LOCK to serialize access
            // from Rust test code. Other threads or C code could still read
            // the environment, which is acceptable in test-only code.
            unsafe { std::env::set_var("OPSBOARD_STATE_FILE", path) };
            Self
        }
    }

    impl Drop for StateFileEnvGuard {
        fn drop(&mut self) {
            // SAFETY: Caller must hold STATE_FILE_ENV_LOCK throughout guard
            // lifetime. See safety comment in new().
            unsafe { std::env::remove_var("OPSBOARD_STATE_FILE") };
        }
    }
}
