//! Configuration for the command-line front end.
//!
//! Settings live in `meili-admin.yaml`; every section and field is
//! optional. Environment variables override the file:
//!
//! - `MEILI_ADMIN_API_URL` overrides `api.base_url`
//! - `MEILI_ADMIN_TIMEOUT_MS` overrides `api.timeout_ms`
//! - `LOG_LEVEL` overrides `logging.level`
//! - `LOG_FORMAT` overrides `logging.format`

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use meili_admin_client::{ClientConfig, DEFAULT_BASE_URL};
use serde::Deserialize;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "meili-admin.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `meili-admin.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdminConfig {
    /// Where the dashboard API lives.
    #[serde(default)]
    pub api: ApiConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    /// The rejected input.
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(s.to_owned()),
        }
    }
}

impl AdminConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if an override does not parse.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load `path` when given, else `meili-admin.yaml` when it exists, else
    /// defaults. Environment overrides apply in every case.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::from_file(fallback);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("MEILI_ADMIN_API_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = lookup("MEILI_ADMIN_TIMEOUT_MS") {
            self.api.timeout_ms = val.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "MEILI_ADMIN_TIMEOUT_MS",
                    value: format!("{val} ({e})"),
                }
            })?;
        }
        if let Some(val) = lookup("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("LOG_FORMAT") {
            self.logging.format = val.parse().map_err(|value| ConfigError::Invalid {
                name: "LOG_FORMAT",
                value,
            })?;
        }
        Ok(())
    }

    /// Client settings derived from the `api` section.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_millis(self.api.timeout_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn parse_without_env(yaml: &str) -> Option<AdminConfig> {
        let mut config: AdminConfig = serde_yml::from_str(yaml).ok()?;
        config.apply_overrides(no_env).ok()?;
        Some(config)
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_without_env("{}").unwrap_or_default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = "
api:
  base_url: http://admin.internal:8080/api
logging:
  format: json
";
        let config = parse_without_env(yaml).unwrap_or_default();
        assert_eq!(config.api.base_url, "http://admin.internal:8080/api");
        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn env_overrides_win() {
        let env: BTreeMap<&str, &str> = [
            ("MEILI_ADMIN_API_URL", "http://other:5000/api"),
            ("MEILI_ADMIN_TIMEOUT_MS", "1500"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let mut config = AdminConfig::default();
        let applied = config.apply_overrides(|name| env.get(name).map(|v| (*v).to_owned()));

        assert!(applied.is_ok());
        assert_eq!(config.api.base_url, "http://other:5000/api");
        assert_eq!(config.client_config().timeout, Duration::from_millis(1500));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn bad_overrides_are_rejected() {
        let mut config = AdminConfig::default();
        let err = config.apply_overrides(|name| {
            (name == "MEILI_ADMIN_TIMEOUT_MS").then(|| "soon".to_owned())
        });
        assert!(matches!(
            err,
            Err(ConfigError::Invalid {
                name: "MEILI_ADMIN_TIMEOUT_MS",
                ..
            })
        ));

        let err = config.apply_overrides(|name| (name == "LOG_FORMAT").then(|| "xml".to_owned()));
        assert!(matches!(err, Err(ConfigError::Invalid { name: "LOG_FORMAT", .. })));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result: Result<AdminConfig, _> = serde_yml::from_str("api: [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AdminConfig::from_file(Path::new("/definitely/not/here.yaml"));
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }
}
