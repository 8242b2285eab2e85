//! Credential strategies.
//!
//! Every strategy implements [`CredentialsBuilder`] and yields a
//! [`SharedCredentialsProvider`] the SDK clients and the signing interceptor
//! can consume. Static strategies validate and decode their keys at build
//! time; the default chain defers resolution to the first signed request.

use std::sync::Arc;

use aws_config::environment::credentials::EnvironmentVariableCredentialsProvider;
use aws_config::imds::credentials::ImdsCredentialsProvider;
use aws_config::meta::credentials::CredentialsProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_credential_types::Credentials;
use aws_credential_types::provider::SharedCredentialsProvider;
use awsbridge_core::{DecodeError, DefaultSecretDecoder, SecretDecoder, SensitiveString};
use tracing::debug;

use crate::error::AuthError;

/// Provider name recorded on statically configured credentials.
const STATIC_PROVIDER_NAME: &str = "awsbridge-static";

/// Produces a credentials provider from configuration.
pub trait CredentialsBuilder: Send + Sync + std::fmt::Debug {
    /// Build the credentials provider.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when required fields are missing or a secret
    /// cannot be decoded.
    fn build(&self) -> Result<SharedCredentialsProvider, AuthError>;
}

/// Static access key / secret key credentials, optionally with a session token.
///
/// The secret key and session token are passed through the configured
/// [`SecretDecoder`] before use.
#[derive(Debug, Clone)]
pub struct StaticCredentialsBuilder {
    access_key: String,
    secret_key: SensitiveString,
    session_token: Option<SensitiveString>,
    decoder: Arc<dyn SecretDecoder>,
}

impl StaticCredentialsBuilder {
    /// Create a builder using the [`DefaultSecretDecoder`].
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<SensitiveString>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            session_token: None,
            decoder: Arc::new(DefaultSecretDecoder),
        }
    }

    /// Attach a session token, making these temporary credentials.
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<SensitiveString>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Replace the secret decoder.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn SecretDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Validate, decode and assemble the credentials value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] for an empty access key, secret key
    /// or session token (before or after decoding), and [`AuthError::Decode`]
    /// if decoding fails.
    pub fn credentials(&self) -> Result<Credentials, AuthError> {
        if self.access_key.trim().is_empty() {
            return Err(AuthError::MissingField("accessKey"));
        }
        let secret_key = self.decode_required(&self.secret_key, "secretKey")?;
        let session_token = self
            .session_token
            .as_ref()
            .map(|token| self.decode_required(token, "sessionToken"))
            .transpose()?;

        debug!(
            access_key_id = %self.access_key,
            temporary = session_token.is_some(),
            "Built static AWS credentials"
        );

        Ok(Credentials::new(
            self.access_key.clone(),
            secret_key.expose_secret(),
            session_token.map(|token| token.expose_secret().to_owned()),
            None,
            STATIC_PROVIDER_NAME,
        ))
    }

    fn decode_required(
        &self,
        value: &SensitiveString,
        field: &'static str,
    ) -> Result<SensitiveString, AuthError> {
        if value.is_blank() {
            return Err(AuthError::MissingField(field));
        }
        if value.is_redacted() {
            return Err(DecodeError::Redacted.into());
        }
        let decoded = self.decoder.decode(value)?;
        if decoded.is_blank() {
            return Err(AuthError::MissingField(field));
        }
        Ok(decoded)
    }
}

impl CredentialsBuilder for StaticCredentialsBuilder {
    fn build(&self) -> Result<SharedCredentialsProvider, AuthError> {
        Ok(SharedCredentialsProvider::new(self.credentials()?))
    }
}

/// The default provider chain: environment variables, then the shared
/// profile file, then the EC2 instance metadata service.
#[derive(Debug, Clone, Default)]
pub struct DefaultCredentialsBuilder {
    profile: Option<String>,
}

impl DefaultCredentialsBuilder {
    /// Create a builder that reads the default profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a named profile instead of the default one.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}

impl CredentialsBuilder for DefaultCredentialsBuilder {
    fn build(&self) -> Result<SharedCredentialsProvider, AuthError> {
        let mut profile = ProfileFileCredentialsProvider::builder();
        if let Some(name) = &self.profile {
            profile = profile.profile_name(name);
        }

        let chain = CredentialsProviderChain::first_try(
            "Environment",
            EnvironmentVariableCredentialsProvider::new(),
        )
        .or_else("Profile", profile.build())
        .or_else("Ec2InstanceMetadata", ImdsCredentialsProvider::builder().build());

        debug!(profile = ?self.profile, "Built default AWS credentials chain");
        Ok(SharedCredentialsProvider::new(chain))
    }
}
