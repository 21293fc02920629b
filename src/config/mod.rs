//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Process settings live in
//! [`GatewayConfig`]; database credentials are resolved separately by
//! [`connection::resolve`] because they may come from the secrets service.

pub mod connection;
pub mod secrets;

use std::net::SocketAddr;

use crate::error::GatewayError;

pub use connection::ConnectionParams;

/// Secret looked up when `DB_SECRET_NAME` is not set.
pub const DEFAULT_SECRET_NAME: &str = "app-db-secret";

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of database connections in the pool.
    pub max_connections: u32,
    /// Minimum idle connections in the pool.
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection before giving up. Bounds
    /// how long `/ready` takes to report an unreachable database.
    pub acquire_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 5,
        }
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// Database pool sizing.
    pub pool: PoolSettings,

    /// Whether to look up credentials in the secrets service at all.
    pub secrets_enabled: bool,

    /// Name of the secret holding the database credentials.
    pub secret_name: String,

    /// Region override for the secrets service client.
    pub secret_region: Option<String>,

    /// Log output format.
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if `LISTEN_ADDR` is set but cannot
    /// be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, GatewayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if `LISTEN_ADDR` is not a valid
    /// socket address.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|e| GatewayError::Config(format!("LISTEN_ADDR {raw_addr:?}: {e}")))?;

        let defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: parse_env(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.max_connections,
            ),
            min_connections: parse_env(
                &lookup,
                "DATABASE_MIN_CONNECTIONS",
                defaults.min_connections,
            ),
            acquire_timeout_secs: parse_env(
                &lookup,
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            ),
        };

        let secrets_enabled = parse_env_bool(&lookup, "DB_SECRETS_ENABLED", true);
        let secret_name = lookup("DB_SECRET_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SECRET_NAME.to_string());
        let secret_region = lookup("DB_SECRET_REGION").filter(|v| !v.is_empty());

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            pool,
            secrets_enabled,
            secret_name,
            secret_region,
            log_format,
        })
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_env<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses a variable as a boolean. Accepts `"true"`, `"1"`, `"false"`,
/// `"0"` (upper or lower case). Returns `default` otherwise.
fn parse_env_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let Ok(cfg) = GatewayConfig::from_lookup(lookup_from(&[])) else {
            panic!("defaults should load");
        };
        assert_eq!(cfg.listen_addr.port(), 8000);
        assert_eq!(cfg.pool, PoolSettings::default());
        assert_eq!(cfg.pool.acquire_timeout_secs, 5);
        assert!(cfg.secrets_enabled);
        assert_eq!(cfg.secret_name, DEFAULT_SECRET_NAME);
        assert_eq!(cfg.secret_region, None);
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_are_applied() {
        let lookup = lookup_from(&[
            ("LISTEN_ADDR", "127.0.0.1:9090"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("DB_SECRETS_ENABLED", "false"),
            ("DB_SECRET_NAME", "prod/db"),
            ("DB_SECRET_REGION", "eu-west-1"),
            ("LOG_FORMAT", "json"),
        ]);
        let Ok(cfg) = GatewayConfig::from_lookup(lookup) else {
            panic!("overrides should load");
        };
        assert_eq!(cfg.listen_addr.port(), 9090);
        assert_eq!(cfg.pool.max_connections, 4);
        assert!(!cfg.secrets_enabled);
        assert_eq!(cfg.secret_name, "prod/db");
        assert_eq!(cfg.secret_region.as_deref(), Some("eu-west-1"));
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let lookup = lookup_from(&[("DATABASE_MIN_CONNECTIONS", "lots")]);
        let Ok(cfg) = GatewayConfig::from_lookup(lookup) else {
            panic!("config should load");
        };
        assert_eq!(cfg.pool.min_connections, 0);
    }

    #[test]
    fn bad_listen_addr_is_a_config_error() {
        let result = GatewayConfig::from_lookup(lookup_from(&[("LISTEN_ADDR", "nowhere")]));
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn empty_secret_name_uses_default() {
        let Ok(cfg) = GatewayConfig::from_lookup(lookup_from(&[("DB_SECRET_NAME", "")])) else {
            panic!("config should load");
        };
        assert_eq!(cfg.secret_name, DEFAULT_SECRET_NAME);
    }
}
