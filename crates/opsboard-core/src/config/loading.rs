//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override
//! earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.opsboard/config.toml` (global user preferences)
//! 3. **Project config** - `./.opsboard/config.toml` (per-checkout overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority, applied by
//!    the caller)

use std::fs;
use std::path::PathBuf;

use crate::config::types::{OpsboardConfig, PageConfig, ServiceConfig};
use crate::errors::ConfigError;

/// Check if an error is a "file not found" error.
fn is_file_not_found(e: &ConfigError) -> bool {
    matches!(e, ConfigError::IoError { source } if source.kind() == std::io::ErrorKind::NotFound)
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a present file fails to parse or validate. Missing
/// config files are not errors.
pub fn load_hierarchy() -> Result<OpsboardConfig, ConfigError> {
    let mut config = OpsboardConfig::default();

    // Load user config (file not found is expected, parse errors fail)
    match load_user_config() {
        Ok(user_config) => config = merge_configs(config, user_config),
        Err(e) if !is_file_not_found(&e) => return Err(e),
        Err(_) => {} // File not found - continue with defaults
    }

    // Load project config (file not found is expected, parse errors fail)
    match load_project_config() {
        Ok(project_config) => config = merge_configs(config, project_config),
        Err(e) if !is_file_not_found(&e) => return Err(e),
        Err(_) => {} // File not found - continue with merged config
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load the user configuration from ~/.opsboard/config.toml.
fn load_user_config() -> Result<OpsboardConfig, ConfigError> {
    let home_dir = dirs::home_dir().ok_or_else(|| ConfigError::InvalidConfiguration {
        message: "Could not find home directory".to_string(),
    })?;
    let config_path = home_dir.join(".opsboard").join("config.toml");
    load_config_file(&config_path)
}

/// Load the project configuration from ./.opsboard/config.toml.
fn load_project_config() -> Result<OpsboardConfig, ConfigError> {
    let config_path = std::env::current_dir()?.join(".opsboard").join("config.toml");
    load_config_file(&config_path)
}

/// Load a configuration file from the given path.
fn load_config_file(path: &PathBuf) -> Result<OpsboardConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: OpsboardConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;
    Ok(config)
}

/// Merge two configurations, with override_config taking precedence.
///
/// Optional fields replace base values only if present.
pub fn merge_configs(base: OpsboardConfig, override_config: OpsboardConfig) -> OpsboardConfig {
    OpsboardConfig {
        service: ServiceConfig {
            base_url: override_config.service.base_url.or(base.service.base_url),
        },
        page: PageConfig {
            document_path: override_config
                .page
                .document_path
                .or(base.page.document_path),
        },
    }
}

/// Validate the merged configuration.
fn validate_config(config: &OpsboardConfig) -> Result<(), ConfigError> {
    let base_url = config.base_url();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("base_url must start with http:// or https://, got '{}'", base_url),
        });
    }
    if base_url.ends_with('/') {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("base_url must not end with '/', got '{}'", base_url),
        });
    }
    if !config.document_path().starts_with('/') {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "document_path must start with '/', got '{}'",
                config.document_path()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(base_url: Option<&str>, document_path: Option<&str>) -> OpsboardConfig {
        OpsboardConfig {
            service: ServiceConfig {
                base_url: base_url.map(String::from),
            },
            page: PageConfig {
                document_path: document_path.map(String::from),
            },
        }
    }

    #[test]
    fn test_merge_override_wins_when_present() {
        let base = config_with(Some("http://a"), Some("/a"));
        let over = config_with(Some("http://b"), None);
        let merged = merge_configs(base, over);
        assert_eq!(merged.base_url(), "http://b");
        assert_eq!(merged.document_path(), "/a");
    }

    #[test]
    fn test_merge_base_survives_when_override_absent() {
        let base = config_with(Some("http://a"), None);
        let merged = merge_configs(base, OpsboardConfig::default());
        assert_eq!(merged.base_url(), "http://a");
        assert_eq!(merged.document_path(), "/");
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = config_with(Some("ftp://a"), None);
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_validate_rejects_trailing_slash() {
        let config = config_with(Some("http://a/"), None);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_relative_document_path() {
        let config = config_with(None, Some("dashboard.html"));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(validate_config(&OpsboardConfig::default()).is_ok());
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert_eq!(
            crate::errors::OpsboardError::error_code(&err),
            "CONFIG_PARSE_ERROR"
        );
    }

    #[test]
    fn test_load_config_file_missing_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let err = load_config_file(&path).unwrap_err();
        assert!(is_file_not_found(&err));
    }
}
