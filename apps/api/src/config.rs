//! API server configuration.
//!
//! Values are layered, highest priority first:
//! 1. Environment variables prefixed `STOCKROOM_` (e.g. `STOCKROOM_PORT`)
//! 2. The TOML file named by `STOCKROOM_CONFIG`, or `stockroom.toml`
//! 3. Built-in defaults

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Development signing secret. Startup warns when it is still in use.
pub const DEV_JWT_SECRET: &str = "stockroom-dev-secret-change-in-production";

/// Upper bound for `session_lifetime_secs` (one year).
pub const MAX_SESSION_LIFETIME_SECS: i64 = 365 * 24 * 60 * 60;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Interface to bind
    pub bind_addr: String,

    /// HTTP port
    pub port: u16,

    /// Directory holding the JSON documents
    pub data_dir: PathBuf,

    /// Secret for signing session tokens
    pub jwt_secret: String,

    /// Session token lifetime in seconds
    pub session_lifetime_secs: i64,

    /// Reject account routes that carry no bearer token
    pub require_auth: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            session_lifetime_secs: 86_400, // 1 day
            require_auth: false,
            log_level: "info,stockroom=debug".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from the config file and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("STOCKROOM_CONFIG").unwrap_or_else(|_| "stockroom.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(Environment::with_prefix("STOCKROOM").try_parsing(true))
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("jwt_secret".to_string()));
        }

        if self.session_lifetime_secs <= 0 || self.session_lifetime_secs > MAX_SESSION_LIFETIME_SECS {
            return Err(ConfigError::InvalidValue("session_lifetime_secs".to_string()));
        }

        Ok(())
    }

    /// Address the server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("bind_addr".to_string()))
    }

    /// True while the development signing secret is configured.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
        assert!(config.uses_dev_secret());
        assert!(!config.require_auth);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ApiConfig {
            session_lifetime_secs: 0,
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let config = ApiConfig {
            session_lifetime_secs: MAX_SESSION_LIFETIME_SECS + 1,
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let config = ApiConfig {
            jwt_secret: String::new(),
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingRequired(_))));
    }

    #[test]
    fn test_bad_bind_addr() {
        let config = ApiConfig {
            bind_addr: "not an address".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "port = 8080\nrequire_auth = true\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: ApiConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.require_auth);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
