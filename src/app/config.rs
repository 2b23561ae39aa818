//! Runtime configuration read from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::ConfigError;
use crate::infra::{DEFAULT_TOKEN_TTL_SECS, LogFormat};

/// Minimum length of the token signing secret, in bytes.
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: SecretString,
    pub token_secret: SecretString,
    pub host: IpAddr,
    pub port: u16,
    pub token_ttl_secs: u64,
    pub log_format: LogFormat,
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable or `None` when unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<SecretString, ConfigError> {
            lookup(key)
                .filter(|v| !v.is_empty())
                .map(SecretString::from)
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let database_url = required("DATABASE_URL")?;
        let token_secret = required("TOKEN_SECRET")?;
        if token_secret.expose_secret().len() < MIN_TOKEN_SECRET_LEN {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_SECRET".to_string(),
                message: format!("must be at least {MIN_TOKEN_SECRET_LEN} bytes"),
            });
        }

        Ok(Self {
            database_url,
            token_secret,
            host: parse_or(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&lookup, "PORT", 3000)?,
            token_ttl_secs: parse_or(&lookup, "TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?,
            log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::default())?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
        })
    }

    /// Address the HTTP server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}
