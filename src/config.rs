//! Service configuration
//!
//! Loaded from an optional JSON file; every field has a default so an
//! empty object (or no file at all) yields a working setup. A few
//! environment variables override file values:
//!
//! - `PORT`: HTTP port
//! - `OTPDESK_DATA_DIR`: directory holding the collection files
//!
//! `RUST_LOG`, when set, replaces `logging.filter`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::store::json_file::{DEFAULT_LOGIN_ATTEMPTS_FILE, DEFAULT_USERS_FILE};
use crate::store::JsonFileStore;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Where the collections live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the collection files (default: ".")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name of the login attempts log (default: "loginAttempts.json")
    #[serde(default = "default_login_attempts_file")]
    pub login_attempts_file: String,

    /// File name of the users collection (default: "users.json")
    #[serde(default = "default_users_file")]
    pub users_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_login_attempts_file() -> String {
    DEFAULT_LOGIN_ATTEMPTS_FILE.to_string()
}

fn default_users_file() -> String {
    DEFAULT_USERS_FILE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            login_attempts_file: default_login_attempts_file(),
            users_file: default_users_file(),
        }
    }
}

impl StorageConfig {
    /// Build the file backend described by this config
    pub fn open(&self) -> JsonFileStore {
        JsonFileStore::new(&self.data_dir)
            .with_file_names(&self.login_attempts_file, &self.users_file)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// `tracing_subscriber::EnvFilter` directives (default: "info")
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: ServiceConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise start from defaults, then apply
    /// environment overrides
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `PORT` and `OTPDESK_DATA_DIR` as returned by `lookup`
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(port) = lookup("PORT") {
            self.http.port = port.trim().parse().map_err(|e| ConfigError::Invalid {
                key: "PORT".to_string(),
                reason: format!("{}", e),
            })?;
        }

        if let Some(dir) = lookup("OTPDESK_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }

        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Invalid {
                key: "http.port".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        for (key, name) in [
            ("storage.login_attempts_file", &self.storage.login_attempts_file),
            ("storage.users_file", &self.storage.users_file),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: key.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: ServiceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.storage.data_dir, PathBuf::from("."));
        assert_eq!(config.storage.login_attempts_file, "loginAttempts.json");
        assert_eq!(config.storage.users_file, "users.json");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("otpdesk.json");
        fs::write(
            &path,
            r#"{"http": {"port": 8080}, "storage": {"data_dir": "/var/lib/otpdesk"}, "logging": {"format": "json"}}"#,
        )
        .unwrap();

        let config = ServiceConfig::load(&path).unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/otpdesk"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = ServiceConfig::load(&temp.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServiceConfig::default();
        config
            .apply_overrides(|key| match key {
                "PORT" => Some("4100".to_string()),
                "OTPDESK_DATA_DIR" => Some("/tmp/otp".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.http.port, 4100);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/otp"));
    }

    #[test]
    fn test_invalid_port_override_rejected() {
        let mut config = ServiceConfig::default();
        let result = config.apply_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_empty_file_name_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("otpdesk.json");
        fs::write(&path, r#"{"storage": {"users_file": " "}}"#).unwrap();

        let result = ServiceConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
