//! The SigV4 signing interceptor and its builder.
//!
//! [`SigningInterceptorBuilder`] validates region and service, obtains a
//! credentials provider from its [`CredentialsBuilder`] and wraps the three
//! into an [`AwsSigningInterceptor`]. The interceptor is stateless apart from
//! that configuration and can be shared across concurrent requests.

use std::sync::Arc;

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use awsbridge_core::{AwsRegion, DefaultSecretDecoder, SecretDecoder};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::SigningConfig;
use crate::credentials::CredentialsBuilder;
use crate::error::AuthError;
use crate::sigv4::RequestSigner;

/// A hook run on each outgoing HTTP request before transmission.
#[async_trait]
pub trait RequestInterceptor: Send + Sync + std::fmt::Debug {
    /// Process the request head; `body` is the full request payload.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the request cannot be processed.
    async fn intercept(
        &self,
        parts: &mut http::request::Parts,
        body: &[u8],
    ) -> Result<(), AuthError>;
}

/// Adds SigV4 authentication to outgoing requests.
#[derive(Debug, Clone)]
pub struct AwsSigningInterceptor {
    region: AwsRegion,
    service: String,
    signer: RequestSigner,
    credentials: SharedCredentialsProvider,
}

impl AwsSigningInterceptor {
    /// The signing region.
    #[must_use]
    pub fn region(&self) -> &AwsRegion {
        &self.region
    }

    /// The signing service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The credentials provider consulted for each request.
    #[must_use]
    pub fn credentials_provider(&self) -> &SharedCredentialsProvider {
        &self.credentials
    }

    /// Sign with already-resolved credentials at a fixed time.
    ///
    /// # Errors
    ///
    /// See [`RequestSigner::sign`].
    pub fn sign_at(
        &self,
        parts: &mut http::request::Parts,
        body: &[u8],
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        self.signer.sign(parts, body, credentials, now)
    }
}

#[async_trait]
impl RequestInterceptor for AwsSigningInterceptor {
    async fn intercept(
        &self,
        parts: &mut http::request::Parts,
        body: &[u8],
    ) -> Result<(), AuthError> {
        let credentials = self.credentials.provide_credentials().await?;
        self.sign_at(parts, body, &credentials, Utc::now())
    }
}

/// Builds an [`AwsSigningInterceptor`] from region, service and a credentials
/// strategy.
#[derive(Debug, Clone)]
pub struct SigningInterceptorBuilder {
    region: AwsRegion,
    service: String,
    credentials: Arc<dyn CredentialsBuilder>,
}

impl SigningInterceptorBuilder {
    /// Create a builder.
    pub fn new(
        region: impl Into<AwsRegion>,
        service: impl Into<String>,
        credentials: Arc<dyn CredentialsBuilder>,
    ) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
            credentials,
        }
    }

    /// Create a builder from configuration, decoding secrets with the
    /// [`DefaultSecretDecoder`].
    #[must_use]
    pub fn from_config(config: SigningConfig) -> Self {
        Self::from_config_with_decoder(config, Arc::new(DefaultSecretDecoder))
    }

    /// Create a builder from configuration with an explicit secret decoder.
    #[must_use]
    pub fn from_config_with_decoder(
        config: SigningConfig,
        decoder: Arc<dyn SecretDecoder>,
    ) -> Self {
        Self {
            region: config.region,
            service: config.service,
            credentials: config.credentials.into_builder(decoder),
        }
    }

    /// Build the interceptor.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] for an empty region or service.
    /// Any error from the credentials strategy is returned as-is.
    pub fn build(&self) -> Result<AwsSigningInterceptor, AuthError> {
        if self.region.is_blank() {
            return Err(AuthError::MissingField("region"));
        }
        if self.service.trim().is_empty() {
            return Err(AuthError::MissingField("service"));
        }

        let credentials = self.credentials.build()?;

        debug!(region = %self.region, service = %self.service, "Built signing interceptor");
        Ok(AwsSigningInterceptor {
            signer: RequestSigner::new(self.region.as_str(), self.service.as_str()),
            region: self.region.clone(),
            service: self.service.clone(),
            credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentialsBuilder;

    /// Strategy whose build always fails.
    #[derive(Debug)]
    struct BrokenCredentials;

    impl CredentialsBuilder for BrokenCredentials {
        fn build(&self) -> Result<SharedCredentialsProvider, AuthError> {
            Err(AuthError::MissingField("brokenField"))
        }
    }

    fn static_credentials() -> Arc<dyn CredentialsBuilder> {
        Arc::new(StaticCredentialsBuilder::new("AKID", "secret"))
    }

    fn request(uri: &str) -> http::request::Parts {
        http::Request::builder()
            .method("POST")
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn test_should_build_interceptor_for_region_and_service() {
        let interceptor = SigningInterceptorBuilder::new("region", "service", static_credentials())
            .build()
            .unwrap();
        assert_eq!(interceptor.region().as_str(), "region");
        assert_eq!(interceptor.service(), "service");
    }

    #[test]
    fn test_should_propagate_credentials_failure_unchanged() {
        let result =
            SigningInterceptorBuilder::new("region", "service", Arc::new(BrokenCredentials))
                .build();
        assert!(matches!(result, Err(AuthError::MissingField("brokenField"))));
    }

    #[test]
    fn test_should_propagate_static_credentials_failure() {
        let credentials = Arc::new(StaticCredentialsBuilder::new("", "secret"));
        let result = SigningInterceptorBuilder::new("region", "service", credentials).build();
        assert!(matches!(result, Err(AuthError::MissingField("accessKey"))));
    }

    #[test]
    fn test_should_reject_blank_region() {
        let result = SigningInterceptorBuilder::new("", "es", static_credentials()).build();
        assert!(matches!(result, Err(AuthError::MissingField("region"))));
    }

    #[test]
    fn test_should_reject_blank_service() {
        let result = SigningInterceptorBuilder::new("eu-west-1", " ", static_credentials()).build();
        assert!(matches!(result, Err(AuthError::MissingField("service"))));
    }

    #[tokio::test]
    async fn test_should_sign_request_on_intercept() {
        let interceptor =
            SigningInterceptorBuilder::new("eu-west-1", "es", static_credentials())
                .build()
                .unwrap();
        let mut parts = request("https://search-logs.eu-west-1.es.amazonaws.com/logs/_doc");

        interceptor.intercept(&mut parts, b"{\"a\":1}").await.unwrap();

        let authorization = parts.headers.get("authorization").unwrap().to_str().unwrap();
        assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKID/"));
        assert!(authorization.contains("/eu-west-1/es/aws4_request"));
        assert!(parts.headers.contains_key("x-amz-date"));
    }

    #[tokio::test]
    async fn test_should_reuse_interceptor_across_concurrent_requests() {
        let interceptor = Arc::new(
            SigningInterceptorBuilder::new("us-east-1", "kinesis", static_credentials())
                .build()
                .unwrap(),
        );

        let tasks: Vec<_> = (0..4)
            .map(|i| {
                let interceptor = Arc::clone(&interceptor);
                tokio::spawn(async move {
                    let mut parts = request(&format!("https://kinesis.us-east-1.amazonaws.com/{i}"));
                    interceptor.intercept(&mut parts, b"").await.unwrap();
                    parts
                })
            })
            .collect();

        for task in tasks {
            let parts = task.await.unwrap();
            assert!(parts.headers.contains_key("authorization"));
        }
    }
}
