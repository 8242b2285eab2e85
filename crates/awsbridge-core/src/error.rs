//! Error types for the awsbridge core.

/// Core error type for bridge-wide configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Failure to turn an obfuscated secret into its plain-text form.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The value after the `base64:` prefix is not valid base64.
    #[error("invalid base64 secret: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded secret is not valid UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    /// An `env:` reference names a variable that is not set.
    #[error("environment variable not set: {0}")]
    MissingVariable(String),

    /// The value is the placeholder written when a secret is serialized.
    #[error("secret is a redacted placeholder, not a value")]
    Redacted,
}

/// Failure to read a message payload.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The payload backing store could not be read.
    #[error("failed to read payload of message {id}: {source}")]
    Io {
        /// Unique id of the message.
        id: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
