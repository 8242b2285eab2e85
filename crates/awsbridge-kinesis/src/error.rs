//! Error types for Kinesis request building.

use aws_sdk_kinesis::error::BuildError;
use awsbridge_core::MessageError;

/// Errors raised while turning a message into Kinesis request values.
#[derive(Debug, thiserror::Error)]
pub enum KinesisError {
    /// The message payload could not be read.
    #[error(transparent)]
    Message(#[from] MessageError),

    /// The SDK rejected the assembled value.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The partition key source yielded no usable key.
    #[error("no partition key available from {0}")]
    MissingPartitionKey(String),

    /// A required configuration field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Convenience result type for Kinesis operations.
pub type KinesisResult<T> = Result<T, KinesisError>;
