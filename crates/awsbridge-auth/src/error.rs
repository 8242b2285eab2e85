//! Error types for credential building and request signing.

use aws_credential_types::provider::error::CredentialsError;
use awsbridge_core::DecodeError;

/// Errors raised while building credentials, building an interceptor or
/// signing a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required configuration field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A configured secret could not be decoded.
    #[error("failed to decode secret: {0}")]
    Decode(#[from] DecodeError),

    /// The credentials provider failed to yield credentials.
    #[error("failed to resolve credentials: {0}")]
    Credentials(#[from] CredentialsError),

    /// The request carries no `Host` header and no absolute URI.
    #[error("missing required header: {0}")]
    MissingHeader(String),

    /// A header value cannot be represented in a signed request.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

/// Convenience result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
