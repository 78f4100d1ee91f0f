use serde::{Deserialize, Serialize};

/// Base URL used when no config file provides one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Document path used when no config file provides one.
pub const DEFAULT_DOCUMENT_PATH: &str = "/";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OpsboardConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub page: PageConfig,
}

/// Where the dashboard backend (system-config API) lives.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub base_url: Option<String>,
}

/// What the hosting page looks like to the router.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PageConfig {
    /// Current document path. Controls context-path derivation: paths under
    /// the API mount produce `/api`-prefixed destinations.
    #[serde(default)]
    pub document_path: Option<String>,
}

impl OpsboardConfig {
    pub fn base_url(&self) -> &str {
        self.service.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn document_path(&self) -> &str {
        self.page
            .document_path
            .as_deref()
            .unwrap_or(DEFAULT_DOCUMENT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_fields_absent() {
        let config = OpsboardConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.document_path(), "/");
    }

    #[test]
    fn test_explicit_values_win() {
        let config = OpsboardConfig {
            service: ServiceConfig {
                base_url: Some("https://ops.example.com".to_string()),
            },
            page: PageConfig {
                document_path: Some("/api/总览".to_string()),
            },
        };
        assert_eq!(config.base_url(), "https://ops.example.com");
        assert_eq!(config.document_path(), "/api/总览");
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: OpsboardConfig = toml::from_str(
            r#"
            [service]
            base_url = "http://dash.internal"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "http://dash.internal");
        assert_eq!(config.document_path(), "/");
    }
}
