//! Database credentials stored in a secrets-management service.
//!
//! The secret is a JSON object with the optional keys `host`, `port`,
//! `dbname`, `username` and `password` (the layout AWS uses for RDS
//! credentials). Any other keys are ignored.

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use serde::Deserialize;

use crate::error::GatewayError;

/// Looks up a secret's string payload by name.
#[async_trait]
pub trait SecretSource: std::fmt::Debug + Send + Sync {
    /// Fetches the raw secret string.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Secrets`] if the lookup fails for any reason
    /// (network, permissions, unknown secret, binary-only secret).
    async fn fetch(&self, name: &str) -> Result<String, GatewayError>;
}

/// `port` as it appears in a secret: RDS writes a number, hand-written
/// secrets often use a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SecretPort {
    /// `"port": 5432`
    Number(u64),
    /// `"port": "5432"`
    Text(String),
}

impl SecretPort {
    /// Returns the port in its textual form.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Parsed secret payload. Every field is optional; missing fields fall
/// back to environment variables during resolution.
#[derive(Clone, Default, Deserialize)]
pub struct SecretPayload {
    /// Database host name.
    pub host: Option<String>,
    /// Database port.
    pub port: Option<SecretPort>,
    /// Database name.
    pub dbname: Option<String>,
    /// Login role.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<String>,
}

impl std::fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretPayload")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl SecretPayload {
    /// Parses the secret string.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Secrets`] if the payload is not a JSON object
    /// with the expected field types.
    pub fn from_json(raw: &str) -> Result<Self, GatewayError> {
        serde_json::from_str(raw).map_err(|e| {
            GatewayError::Secrets(format!("secret payload is not a valid object: {e}"))
        })
    }
}

/// Fetches and parses the named secret.
///
/// # Errors
///
/// Returns [`GatewayError::Secrets`] if the lookup or parsing fails.
pub async fn load_payload(
    source: &dyn SecretSource,
    name: &str,
) -> Result<SecretPayload, GatewayError> {
    let raw = source.fetch(name).await?;
    SecretPayload::from_json(&raw)
}

/// AWS Secrets Manager client.
#[derive(Debug, Clone)]
pub struct AwsSecretsManager {
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretsManager {
    /// Builds a client from the default AWS configuration chain.
    ///
    /// `region` overrides the region from the environment/profile. Pass
    /// `None` to use the SDK default.
    pub async fn new(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(r) = region {
            loader = loader.region(aws_config::Region::new(r.to_string()));
        }
        let sdk_config = loader.load().await;
        Self {
            client: aws_sdk_secretsmanager::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SecretSource for AwsSecretsManager {
    async fn fetch(&self, name: &str) -> Result<String, GatewayError> {
        let resp = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| {
                GatewayError::Secrets(format!(
                    "lookup of {name:?} failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        resp.secret_string()
            .map(str::to_string)
            .ok_or_else(|| GatewayError::Secrets(format!("secret {name:?} has no string payload")))
    }
}
