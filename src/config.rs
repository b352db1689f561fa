//! Configuration System
//!
//! Loads the CLI configuration from a TOML file with environment variable
//! overrides. Every section and field has a default, so an empty file (or
//! no file at all) is a valid configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{Level, Stream};
use crate::i18n::Lang;
use crate::links::DEFAULT_ADMIN_URL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub student: StudentConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_admin_url")]
    pub admin_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8001/api/".to_string()
}

fn default_admin_url() -> String {
    DEFAULT_ADMIN_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            admin_url: default_admin_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Who is learning, and what content to show them
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentConfig {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub stream: Stream,

    #[serde(default)]
    pub level: Level,

    #[serde(default)]
    pub lang: Lang,
}

/// Local files (favorites)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("norskkurs").to_string_lossy().to_string())
        .unwrap_or_else(|| "./norskkurs_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~/` expanded
    pub fn data_path(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Search paths: the user config dir, then the working directory
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("norskkurs").join("config.toml")),
            Some(PathBuf::from("./norskkurs.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("NORSKKURS_API_URL") {
            self.api.base_url = url;
        }
        if let Some(url) = lookup("NORSKKURS_ADMIN_URL") {
            self.api.admin_url = url;
        }

        if let Some(email) = lookup("NORSKKURS_EMAIL") {
            self.student.email = email;
        }

        if let Some(data_dir) = lookup("NORSKKURS_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(level) = lookup("NORSKKURS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("NORSKKURS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Norskkurs Configuration
#
# Environment variables override these settings:
# - NORSKKURS_API_URL
# - NORSKKURS_ADMIN_URL
# - NORSKKURS_EMAIL
# - NORSKKURS_DATA_DIR
# - NORSKKURS_LOG_LEVEL
# - NORSKKURS_LOG_FORMAT

[api]
# REST API base URL (must end with /api/)
base_url = "http://localhost:8001/api/"

# Host serving the admin site (login, logout, panel links)
admin_url = "http://localhost:8001"

# Request timeout in seconds
request_timeout_secs = 30

[student]
# Email used to look up assigned content and to sign submissions
email = ""

# Name sent with test submissions
name = ""

# Stream: bokmaal, nynorsk or english
stream = "bokmaal"

# Level: A1, A2, B1 or B2
level = "A1"

# Preferred translation language: en, nb, nn or ru
lang = "en"

[storage]
# Directory for favorites
data_dir = "~/.local/share/norskkurs"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8001/api/");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.student.stream, Stream::Bokmaal);
        assert_eq!(config.student.level, Level::A1);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.admin_url, "http://localhost:8001");
        assert_eq!(config.student.lang, Lang::En);
        assert_eq!(config.storage.data_dir, "~/.local/share/norskkurs");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("norskkurs.toml");
        std::fs::write(
            &path,
            r#"
[student]
email = "kari@example.com"
stream = "nynorsk"
level = "B1"
lang = "ru"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.student.email, "kari@example.com");
        assert_eq!(config.student.stream, Stream::Nynorsk);
        assert_eq!(config.student.level, Level::B1);
        assert_eq!(config.student.lang, Lang::Ru);
        assert_eq!(config.api.base_url, "http://localhost:8001/api/");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[student]\nlevel = \"C2\"\n").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_data_path_expands_home() {
        let storage = StorageConfig {
            data_dir: "/var/lib/norskkurs".to_string(),
        };
        assert_eq!(storage.data_path(), PathBuf::from("/var/lib/norskkurs"));

        let storage = StorageConfig {
            data_dir: "~/.local/share/norskkurs".to_string(),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(storage.data_path(), home.join(".local/share/norskkurs"));
        }
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("NORSKKURS_API_URL", "https://norsk.example.com/api/"),
            ("NORSKKURS_EMAIL", "ola@example.com"),
            ("NORSKKURS_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://norsk.example.com/api/");
        assert_eq!(config.student.email, "ola@example.com");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_default_paths_order() {
        let paths = Config::default_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from("./norskkurs.toml")));
        if let Some(dir) = dirs::config_dir() {
            assert_eq!(paths[0], dir.join("norskkurs").join("config.toml"));
        }
    }
}
