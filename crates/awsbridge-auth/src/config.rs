//! Declarative configuration for credentials and signing.

use std::sync::Arc;

use awsbridge_core::{AwsRegion, SecretDecoder, SensitiveString};
use serde::{Deserialize, Serialize};

use crate::credentials::{CredentialsBuilder, DefaultCredentialsBuilder, StaticCredentialsBuilder};

/// Selects and parameterises a credentials strategy.
///
/// ```json
/// { "type": "static", "accessKey": "AKID", "secretKey": "base64:c2VjcmV0" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CredentialsConfig {
    /// Long-lived access key and secret key.
    #[serde(rename_all = "camelCase")]
    Static {
        /// Access key id.
        access_key: String,
        /// Secret access key, possibly obfuscated.
        secret_key: SensitiveString,
    },
    /// Temporary keys with a session token.
    #[serde(rename_all = "camelCase")]
    Session {
        /// Access key id.
        access_key: String,
        /// Secret access key, possibly obfuscated.
        secret_key: SensitiveString,
        /// Session token, possibly obfuscated.
        session_token: SensitiveString,
    },
    /// Environment, profile file, then instance metadata.
    #[serde(rename_all = "camelCase")]
    Default {
        /// Named profile to read from the shared profile file.
        #[serde(default)]
        profile: Option<String>,
    },
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self::Default { profile: None }
    }
}

impl CredentialsConfig {
    /// Turn the configuration into its strategy.
    #[must_use]
    pub fn into_builder(self, decoder: Arc<dyn SecretDecoder>) -> Arc<dyn CredentialsBuilder> {
        match self {
            Self::Static {
                access_key,
                secret_key,
            } => Arc::new(StaticCredentialsBuilder::new(access_key, secret_key).with_decoder(decoder)),
            Self::Session {
                access_key,
                secret_key,
                session_token,
            } => Arc::new(
                StaticCredentialsBuilder::new(access_key, secret_key)
                    .with_session_token(session_token)
                    .with_decoder(decoder),
            ),
            Self::Default { profile } => {
                let builder = DefaultCredentialsBuilder::new();
                Arc::new(match profile {
                    Some(name) => builder.with_profile(name),
                    None => builder,
                })
            }
        }
    }
}

/// Configuration of a signing interceptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningConfig {
    /// Signing region.
    pub region: AwsRegion,
    /// Signing service name, e.g. `es`.
    pub service: String,
    /// Credentials strategy.
    #[serde(default)]
    pub credentials: CredentialsConfig,
}
