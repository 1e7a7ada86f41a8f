//! Server configuration loaded from the environment.
//!
//! | Variable                   | Default          | Notes                  |
//! |----------------------------|------------------|------------------------|
//! | `HEALTHBOARD_DATABASE_URL` | (required)       | `PostgreSQL` URL       |
//! | `HEALTHBOARD_BIND_ADDR`    | `127.0.0.1:8000` | socket address         |
//! | `HEALTHBOARD_POOL_SIZE`    | `8`              | must be at least 1     |
//! | `RUST_LOG`                 | [`DEFAULT_LOG_FILTER`] | `tracing` filter |

use std::net::SocketAddr;
use thiserror::Error;

/// Environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "HEALTHBOARD_DATABASE_URL";
/// Environment variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "HEALTHBOARD_BIND_ADDR";
/// Environment variable holding the connection pool size.
pub const POOL_SIZE_VAR: &str = "HEALTHBOARD_POOL_SIZE";
/// Environment variable overriding the log filter.
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
/// Pool size used when none is configured.
pub const DEFAULT_POOL_SIZE: u32 = 8;
/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "healthboard=info,tower_http=info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("{variable} has invalid value '{value}': {reason}")]
    Invalid {
        /// Offending variable.
        variable: &'static str,
        /// Value as found in the environment.
        value: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Socket address to listen on.
    pub bind_addr: SocketAddr,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL_VAR).ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;

        let bind_text = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_text
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                variable: BIND_ADDR_VAR,
                value: bind_text.clone(),
                reason: err.to_string(),
            })?;

        let pool_size = match read(POOL_SIZE_VAR) {
            None => DEFAULT_POOL_SIZE,
            Some(text) => parse_pool_size(&text)?,
        };

        let log_filter = read(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            database_url,
            bind_addr,
            pool_size,
            log_filter,
        })
    }
}

fn parse_pool_size(text: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        variable: POOL_SIZE_VAR,
        value: text.to_owned(),
        reason,
    };
    let size = text
        .parse::<u32>()
        .map_err(|err| invalid(err.to_string()))?;
    if size == 0 {
        return Err(invalid("pool size must be at least 1".to_owned()));
    }
    Ok(size)
}
