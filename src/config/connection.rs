//! Database connection parameters and their resolution.
//!
//! Each field is taken from the secret when present and non-empty,
//! otherwise from its environment variable. Host, database name, user and
//! password are mandatory; the port defaults to `5432`.

use sqlx::postgres::PgConnectOptions;

use super::secrets::{self, SecretPayload, SecretSource};
use crate::error::GatewayError;

/// Port used when neither the secret nor `DATABASE_PORT` provides one.
pub const DEFAULT_PORT: u16 = 5432;

/// How a bad port taken from the secret is named in errors.
const SECRET_PORT_SOURCE: &str = "secret key `port`";

/// Environment variable names for each connection field.
pub mod env_keys {
    /// Database host.
    pub const HOST: &str = "DATABASE_HOST";
    /// Database port.
    pub const PORT: &str = "DATABASE_PORT";
    /// Database name.
    pub const NAME: &str = "DATABASE_NAME";
    /// Login role.
    pub const USER: &str = "DATABASE_USER";
    /// Login password.
    pub const PASSWORD: &str = "DATABASE_PASSWORD";
}

/// Fully resolved connection parameters. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Database host name or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Database name.
    pub dbname: String,
    /// Login role.
    pub username: String,
    /// Login password.
    pub password: String,
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ConnectionParams {
    /// Merges an optional secret payload with environment fallbacks.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] naming every mandatory field that is
    /// still missing, or if the port is not a valid `u16`.
    pub fn resolve<F>(secret: Option<&SecretPayload>, env: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |from_secret: Option<String>, key: &str| {
            non_empty(from_secret).or_else(|| non_empty(env(key)))
        };

        let host = pick(secret.and_then(|s| s.host.clone()), env_keys::HOST);
        let dbname = pick(secret.and_then(|s| s.dbname.clone()), env_keys::NAME);
        let username = pick(secret.and_then(|s| s.username.clone()), env_keys::USER);
        let password = pick(secret.and_then(|s| s.password.clone()), env_keys::PASSWORD);
        let secret_port =
            non_empty(secret.and_then(|s| s.port.as_ref().map(secrets::SecretPort::to_text)));
        let (raw_port, port_source) = match secret_port {
            Some(raw) => (Some(raw), SECRET_PORT_SOURCE),
            None => (non_empty(env(env_keys::PORT)), env_keys::PORT),
        };

        let (Some(host), Some(dbname), Some(username), Some(password)) =
            (host.clone(), dbname.clone(), username.clone(), password.clone())
        else {
            let missing: Vec<&str> = [
                (env_keys::HOST, host.is_none()),
                (env_keys::NAME, dbname.is_none()),
                (env_keys::USER, username.is_none()),
                (env_keys::PASSWORD, password.is_none()),
            ]
            .into_iter()
            .filter_map(|(key, absent)| absent.then_some(key))
            .collect();
            return Err(GatewayError::Config(format!(
                "missing required database settings: {}",
                missing.join(", ")
            )));
        };

        let port = match raw_port {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                GatewayError::Config(format!("{port_source} {raw:?} is not a valid port: {e}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            dbname,
            username,
            password,
        })
    }

    /// Builds `sqlx` connect options. Fields are passed individually, so
    /// passwords with URL-reserved characters need no escaping.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .username(&self.username)
            .password(&self.password)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Resolves connection parameters at startup.
///
/// When `source` is given the named secret is fetched first; a lookup or
/// parse failure aborts resolution. Environment variables fill whatever the
/// secret leaves out.
///
/// # Errors
///
/// Returns [`GatewayError::Secrets`] if the secret cannot be loaded, or
/// [`GatewayError::Config`] if mandatory fields are still missing.
pub async fn resolve<F>(
    source: Option<&dyn SecretSource>,
    secret_name: &str,
    env: F,
) -> Result<ConnectionParams, GatewayError>
where
    F: Fn(&str) -> Option<String>,
{
    let payload = match source {
        Some(source) => {
            let payload = secrets::load_payload(source, secret_name).await?;
            tracing::info!(
                secret = secret_name,
                "loaded database credentials from secrets service"
            );
            Some(payload)
        }
        None => None,
    };
    ConnectionParams::resolve(payload.as_ref(), env)
}
