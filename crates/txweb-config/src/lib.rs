//! Configuration management for txweb
//!
//! This module handles loading, validation, and management of
//! txweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigErrorDetails, ConfigErrorSeverity};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Upstream transactions API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the remote API, without the `/api/v1` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts for a failed detail fetch (the list fetch never retries)
    #[serde(default = "default_detail_retry_attempts")]
    pub detail_retry_attempts: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            detail_retry_attempts: default_detail_retry_attempts(),
        }
    }
}

impl ApiConfig {
    /// Copy of this section safe to show to users
    pub fn masked(&self) -> Self {
        Self {
            token: self.token.as_ref().map(|_| "******".to_string()),
            ..self.clone()
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_detail_retry_attempts() -> u32 {
    2
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Initial page size for the transaction list
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Choices offered by the page-size selector
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<u32>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_page_size_options() -> Vec<u32> {
    vec![10, 20, 30, 40, 50]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::IoError)?;

        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults on warning-level errors
    /// (a missing file); everything else is returned
    pub fn load_or_default(path: PathBuf) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(e) if e.severity() == ConfigErrorSeverity::Warning => Ok(Config::default()),
            other => other,
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api.base_url".to_string(),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.pagination.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size".to_string(),
                reason: "Page size must be greater than 0".to_string(),
            });
        }

        if self.pagination.page_size_options.iter().any(|&n| n == 0) {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size_options".to_string(),
                reason: "Page size options must all be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the dashboard server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Copy of the configuration with secrets masked
    pub fn masked(&self) -> Self {
        Self {
            api: self.api.masked(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.pagination.page_size, 10);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.detail_retry_attempts, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.pagination.page_size, 10);
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::from_yaml("api:\n  base_url: https://api.example.com\n  token: abc\n").unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert_eq!(config.pagination.page_size_options, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_invalid_page_size() {
        let err = Config::from_yaml("pagination:\n  page_size: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "pagination.page_size"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml));
    }

    #[test]
    fn test_masked_hides_token() {
        let mut config = Config::default();
        config.api.token = Some("secret".to_string());
        assert_eq!(config.masked().api.token.as_deref(), Some("******"));
        assert_eq!(config.api.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_unreadable_path_is_not_defaulted() {
        // A directory exists but cannot be read as a file
        let err = Config::load_or_default(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError));
        assert_eq!(err.severity(), ConfigErrorSeverity::Error);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default(PathBuf::from("/nonexistent/txweb.yaml")).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
