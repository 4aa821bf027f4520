//! Application configuration loaded from a YAML file with environment overrides.
//!
//! Configuration is loaded once at startup and validated before storage is
//! opened. Loading never terminates the process: the caller decides whether a
//! [`ConfigError`] is fatal.
//!
//! ## File location
//!
//! `CONFIG_PATH` selects the file; it defaults to `./config/local.yaml`.
//!
//! ## Example
//!
//! ```yaml
//! env: local                    # local | dev | prod (default: local)
//! storage_path: ./storage/storage.db
//! alias_length: 6               # default: 6
//! http_server:
//!   address: localhost:8080     # default: localhost:8080
//!   timeout: 4s                 # default: 4s
//!   idle_timeout: 1m            # default: 5s
//!   user: admin
//!   password: secret
//! ```
//!
//! Durations accept unit suffixes (`4s`, `1m`, `1500ms`); a bare number is
//! read as whole seconds.
//!
//! ## Required fields
//!
//! - `storage_path`
//! - `http_server.password` (may come from `HTTP_SERVER_PASSWORD` instead)

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_with::{DeserializeAs, serde_as};
use thiserror::Error;

use crate::utils::alias_generator::MAX_ALIAS_LENGTH;

/// Config file read when `CONFIG_PATH` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "./config/local.yaml";

/// Environment variable selecting the config file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Environment variable overriding `http_server.password`.
pub const PASSWORD_ENV: &str = "HTTP_SERVER_PASSWORD";

/// Configuration failure. Every variant means the configuration is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file doesn't exist: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("error reading config: {0}")]
    Parse(#[from] Box<figment::Error>),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Deployment environment; selects the logging profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Prod => "prod",
        };
        f.write_str(name)
    }
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub env: Environment,
    pub storage_path: PathBuf,
    /// Length of generated aliases.
    #[serde(default = "default_alias_length")]
    pub alias_length: usize,
    pub http_server: HttpServer,
}

/// Settings for the HTTP layer that fronts the storage.
#[serde_as]
#[derive(Clone, Deserialize)]
pub struct HttpServer {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde_as(as = "SecondsOrUnits")]
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    #[serde_as(as = "SecondsOrUnits")]
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: Duration,
    #[serde(default)]
    pub user: Option<String>,
    pub password: String,
}

impl fmt::Debug for HttpServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpServer")
            .field("address", &self.address)
            .field("timeout", &self.timeout)
            .field("idle_timeout", &self.idle_timeout)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Duration written as whole seconds (`4`, `"4"`) or with units (`4s`, `1m`).
struct SecondsOrUnits;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Seconds(u64),
    Text(String),
}

impl<'de> DeserializeAs<'de, Duration> for SecondsOrUnits {
    fn deserialize_as<D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawDuration::deserialize(deserializer)? {
            RawDuration::Seconds(secs) => Ok(Duration::from_secs(secs)),
            RawDuration::Text(text) => parse_duration(&text).map_err(de::Error::custom),
        }
    }
}

fn parse_duration(text: &str) -> Result<Duration, humantime::DurationError> {
    let text = text.trim();
    if let Ok(secs) = text.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(text)
}

fn default_alias_length() -> usize {
    6
}

fn default_address() -> String {
    "localhost:8080".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(4)
}

fn default_idle_timeout() -> Duration {
    Duration::from_secs(5)
}

impl Config {
    /// Reads the YAML file at `path`, applies environment overrides and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingFile`] if `path` is not a file
    /// - [`ConfigError::Parse`] if the YAML is malformed or a required field is absent
    /// - [`ConfigError::Invalid`] if a value fails validation
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(
                Env::raw()
                    .only(&[PASSWORD_ENV])
                    .map(|_| "http_server.password".into()),
            )
            .extract()
            .map_err(Box::new)?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if:
    /// - `storage_path` is empty
    /// - `alias_length` is 0 or longer than 64
    /// - `http_server.address` is not `host:port`
    /// - either timeout is zero
    /// - `http_server.password` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "storage_path must not be empty".to_string(),
            ));
        }

        if self.alias_length == 0 || self.alias_length > MAX_ALIAS_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "alias_length must be between 1 and {}, got {}",
                MAX_ALIAS_LENGTH, self.alias_length
            )));
        }

        if !self.http_server.address.contains(':') {
            return Err(ConfigError::Invalid(format!(
                "http_server.address must be in format 'host:port', got '{}'",
                self.http_server.address
            )));
        }

        if self.http_server.timeout.is_zero() || self.http_server.idle_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "http_server timeouts must be greater than 0".to_string(),
            ));
        }

        if self.http_server.password.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "http_server.password must be set (or provide {})",
                PASSWORD_ENV
            )));
        }

        Ok(())
    }

    /// Logs a configuration summary (without sensitive data).
    pub fn summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env);
        tracing::info!("  Storage: {}", self.storage_path.display());
        tracing::info!("  Alias length: {}", self.alias_length);
        tracing::info!("  HTTP address: {}", self.http_server.address);
        tracing::info!(
            "  HTTP timeouts: {}s request, {}s idle",
            self.http_server.timeout.as_secs(),
            self.http_server.idle_timeout.as_secs()
        );
        tracing::info!(
            "  Basic auth user: {}",
            self.http_server.user.as_deref().unwrap_or("<none>")
        );
    }
}

/// Returns the config file path: `CONFIG_PATH` or [`DEFAULT_CONFIG_PATH`].
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Loads and validates configuration from [`config_path`].
///
/// # Note
///
/// This function expects a `.env` file, if any, to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load() -> Result<Config, ConfigError> {
    Config::load(config_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    const FULL_CONFIG: &str = r#"
env: prod
storage_path: ./storage/storage.db
alias_length: 8
http_server:
  address: 0.0.0.0:8082
  timeout: 10
  idle_timeout: 60
  user: admin
  password: from-file
"#;

    const MINIMAL_CONFIG: &str = r#"
storage_path: ./storage.db
http_server:
  password: secret
"#;

    #[test]
    fn test_load_full_config() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", FULL_CONFIG)?;

            let config = Config::load("config.yaml").map_err(|e| e.to_string())?;

            assert_eq!(config.env, Environment::Prod);
            assert_eq!(config.storage_path, PathBuf::from("./storage/storage.db"));
            assert_eq!(config.alias_length, 8);
            assert_eq!(config.http_server.address, "0.0.0.0:8082");
            assert_eq!(config.http_server.timeout, Duration::from_secs(10));
            assert_eq!(config.http_server.idle_timeout, Duration::from_secs(60));
            assert_eq!(config.http_server.user.as_deref(), Some("admin"));
            assert_eq!(config.http_server.password, "from-file");
            Ok(())
        });
    }

    #[test]
    fn test_defaults_applied() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", MINIMAL_CONFIG)?;

            let config = Config::load("config.yaml").map_err(|e| e.to_string())?;

            assert_eq!(config.env, Environment::Local);
            assert_eq!(config.alias_length, 6);
            assert_eq!(config.http_server.address, "localhost:8080");
            assert_eq!(config.http_server.timeout, Duration::from_secs(4));
            assert_eq!(config.http_server.idle_timeout, Duration::from_secs(5));
            assert!(config.http_server.user.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_password_overridden_by_env() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", FULL_CONFIG)?;
            jail.set_env(PASSWORD_ENV, "from-env");

            let config = Config::load("config.yaml").map_err(|e| e.to_string())?;

            assert_eq!(config.http_server.password, "from-env");
            Ok(())
        });
    }

    #[test]
    fn test_password_supplied_only_by_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "storage_path: ./storage.db\nhttp_server:\n  address: localhost:9000\n",
            )?;
            jail.set_env(PASSWORD_ENV, "from-env");

            let config = Config::load("config.yaml").map_err(|e| e.to_string())?;

            assert_eq!(config.http_server.password, "from-env");
            assert_eq!(config.http_server.address, "localhost:9000");
            Ok(())
        });
    }

    #[test]
    fn test_durations_with_units() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "storage_path: ./storage.db\nhttp_server:\n  timeout: 4s\n  idle_timeout: 1m\n  password: secret\n",
            )?;

            let config = Config::load("config.yaml").map_err(|e| e.to_string())?;

            assert_eq!(config.http_server.timeout, Duration::from_secs(4));
            assert_eq!(config.http_server.idle_timeout, Duration::from_secs(60));
            Ok(())
        });
    }

    #[test]
    fn test_durations_as_numeric_strings() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "storage_path: ./storage.db\nhttp_server:\n  timeout: \"10\"\n  idle_timeout: 1500ms\n  password: secret\n",
            )?;

            let config = Config::load("config.yaml").map_err(|e| e.to_string())?;

            assert_eq!(config.http_server.timeout, Duration::from_secs(10));
            assert_eq!(config.http_server.idle_timeout, Duration::from_millis(1500));
            Ok(())
        });
    }

    #[test]
    fn test_duration_with_unknown_unit_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "storage_path: ./storage.db\nhttp_server:\n  timeout: 4 parsecs\n  password: secret\n",
            )?;

            let result = Config::load("config.yaml");

            assert!(matches!(result, Err(ConfigError::Parse(_))));
            Ok(())
        });
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("4").unwrap(), Duration::from_secs(4));
        assert_eq!(parse_duration(" 4s ").unwrap(), Duration::from_secs(4));
        assert_eq!(parse_duration("1m").unwrap(), Duration::from_secs(60));
        assert_eq!(parse_duration("1h 30m").unwrap(), Duration::from_secs(5400));
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_missing_file() {
        Jail::expect_with(|_jail| {
            let result = Config::load("does-not-exist.yaml");

            assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_missing_storage_path() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "http_server:\n  password: secret\n")?;

            let result = Config::load("config.yaml");

            assert!(matches!(result, Err(ConfigError::Parse(_))));
            Ok(())
        });
    }

    #[test]
    fn test_missing_password() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "storage_path: ./storage.db\nhttp_server: {}\n")?;

            let result = Config::load("config.yaml");

            assert!(matches!(result, Err(ConfigError::Parse(_))));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_env_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "env: staging\nstorage_path: ./storage.db\nhttp_server:\n  password: secret\n",
            )?;

            assert!(Config::load("config.yaml").is_err());
            Ok(())
        });
    }

    #[test]
    fn test_config_path_from_env() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.yaml", MINIMAL_CONFIG)?;
            jail.set_env(CONFIG_PATH_ENV, "custom.yaml");

            assert_eq!(config_path(), PathBuf::from("custom.yaml"));
            assert!(load().is_ok());
            Ok(())
        });
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config {
            env: Environment::Local,
            storage_path: PathBuf::from("./storage.db"),
            alias_length: 6,
            http_server: HttpServer {
                address: default_address(),
                timeout: default_timeout(),
                idle_timeout: default_idle_timeout(),
                user: None,
                password: "secret".to_string(),
            },
        };

        assert!(config.validate().is_ok());

        config.alias_length = 0;
        assert!(config.validate().is_err());

        config.alias_length = MAX_ALIAS_LENGTH + 1;
        assert!(config.validate().is_err());

        config.alias_length = 6;

        config.http_server.address = "8080".to_string();
        assert!(config.validate().is_err());

        config.http_server.address = default_address();

        config.http_server.timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        config.http_server.timeout = default_timeout();

        config.http_server.password.clear();
        assert!(config.validate().is_err());

        config.http_server.password = "secret".to_string();

        config.storage_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_masks_password() {
        let server = HttpServer {
            address: default_address(),
            timeout: default_timeout(),
            idle_timeout: default_idle_timeout(),
            user: Some("admin".to_string()),
            password: "hunter2".to_string(),
        };

        let rendered = format!("{:?}", server);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }
}
