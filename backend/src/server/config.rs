//! Environment-derived server configuration.
//!
//! ```text
//! ROLODEX_BIND_ADDR                listen address       (default 0.0.0.0:8080)
//! ROLODEX_DATABASE_PATH            SQLite file          (default users.db)
//! ROLODEX_RANDOM_USER_URL          fallback endpoint    (default random-data-api)
//! ROLODEX_RANDOM_USER_TIMEOUT_SECS outbound timeout     (default 30)
//! ```

use std::env;
use std::time::Duration;

use url::Url;

use crate::outbound::random_user::DEFAULT_RANDOM_USER_ENDPOINT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_PATH: &str = "users.db";
const DEFAULT_RANDOM_USER_TIMEOUT_SECS: u64 = 30;

/// Configuration errors surfaced at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The random-user endpoint is not a valid URL.
    #[error("invalid random user endpoint {value:?}: {message}")]
    InvalidEndpoint { value: String, message: String },

    /// The outbound timeout is not a positive integer.
    #[error("invalid random user timeout {value:?}: expected seconds as a positive integer")]
    InvalidTimeout { value: String },
}

/// Settings for the outbound random-user source.
#[derive(Debug, Clone)]
pub struct RandomUserConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

/// Process configuration assembled from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub database_path: String,
    pub random_user: RandomUserConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    /// Absent variables fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr =
            lookup("ROLODEX_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let database_path =
            lookup("ROLODEX_DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_owned());

        let endpoint_raw = lookup("ROLODEX_RANDOM_USER_URL")
            .unwrap_or_else(|| DEFAULT_RANDOM_USER_ENDPOINT.to_owned());
        let endpoint =
            Url::parse(&endpoint_raw).map_err(|err| ConfigError::InvalidEndpoint {
                value: endpoint_raw.clone(),
                message: err.to_string(),
            })?;

        let timeout_secs = match lookup("ROLODEX_RANDOM_USER_TIMEOUT_SECS") {
            None => DEFAULT_RANDOM_USER_TIMEOUT_SECS,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout { value: raw })?,
        };

        Ok(Self {
            bind_addr,
            database_path,
            random_user: RandomUserConfig {
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).expect("default config");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.database_path, "users.db");
        assert_eq!(
            config.random_user.endpoint.as_str(),
            DEFAULT_RANDOM_USER_ENDPOINT
        );
        assert_eq!(config.random_user.timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("ROLODEX_BIND_ADDR", "127.0.0.1:9999"),
            ("ROLODEX_DATABASE_PATH", "/tmp/test.db"),
            ("ROLODEX_RANDOM_USER_URL", "https://example.com/random"),
            ("ROLODEX_RANDOM_USER_TIMEOUT_SECS", "5"),
        ])
        .expect("explicit config");
        assert_eq!(config.bind_addr, "127.0.0.1:9999");
        assert_eq!(config.database_path, "/tmp/test.db");
        assert_eq!(
            config.random_user.endpoint.as_str(),
            "https://example.com/random"
        );
        assert_eq!(config.random_user.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = config_from(&[("ROLODEX_RANDOM_USER_URL", "not a url")])
            .expect_err("must reject endpoint");
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn zero_or_garbage_timeout_is_rejected() {
        for raw in ["0", "-3", "soon"] {
            let err = config_from(&[("ROLODEX_RANDOM_USER_TIMEOUT_SECS", raw)])
                .expect_err("must reject timeout");
            assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
        }
    }
}
