//! Client for the dashboard's system-config REST API.
//!
//! The backend exposes named configuration values at
//! `GET {base_url}/api/system-config/get/{key}`, each returning
//! `{ "code": <int>, "data": <string> }`. The auto-refresh scheduler reads
//! two of them at page init. Failures here are expected to be tolerated by
//! callers (the feature degrades, the page keeps working).

use std::future::Future;

use serde::Deserialize;

use crate::errors::OpsboardError;

/// Key for the flag that enables auto-refresh.
pub const AUTO_REFRESH_KEY: &str = "system.autoRefresh";

/// Key for the refresh interval in seconds.
pub const REFRESH_INTERVAL_KEY: &str = "system.refreshInterval";

/// Success status code in system-config responses.
pub const OK_CODE: i64 = 200;

/// One named configuration value as returned by the backend.
///
/// `data` is always textual; interpretation (boolean flag, integer seconds)
/// is up to the consumer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigValue {
    pub code: i64,
    pub data: String,
}

impl ConfigValue {
    pub fn is_ok(&self) -> bool {
        self.code == OK_CODE
    }
}

/// Error communicating with the system-config API.
#[derive(Debug, thiserror::Error)]
pub enum RemoteConfigError {
    #[error("Request for '{key}' failed: {message}")]
    RequestFailed { key: String, message: String },

    #[error("Invalid response for '{key}': {message}")]
    InvalidResponse { key: String, message: String },
}

impl OpsboardError for RemoteConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            RemoteConfigError::RequestFailed { .. } => "CONFIG_REQUEST_FAILED",
            RemoteConfigError::InvalidResponse { .. } => "CONFIG_INVALID_RESPONSE",
        }
    }
}

/// Source of named configuration values.
///
/// Seam for the scheduler: production uses [`HttpConfigSource`], tests use
/// in-memory fakes.
pub trait ConfigSource {
    fn get_value(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<ConfigValue, RemoteConfigError>> + Send;
}

/// HTTP client for the system-config API.
#[derive(Debug, Clone)]
pub struct HttpConfigSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpConfigSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ConfigSource for HttpConfigSource {
    async fn get_value(&self, key: &str) -> Result<ConfigValue, RemoteConfigError> {
        let url = format!("{}/api/system-config/get/{}", self.base_url, key);

        let response = self.client.get(&url).send().await.map_err(|e| {
            RemoteConfigError::RequestFailed {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;

        response
            .json::<ConfigValue>()
            .await
            .map_err(|e| RemoteConfigError::InvalidResponse {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}
