//! Error types for ACL building.

use aws_sdk_s3::error::BuildError;

/// Errors raised while building ACL values.
#[derive(Debug, thiserror::Error)]
pub enum AclError {
    /// The SDK rejected an assembled value.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Convenience result type for ACL operations.
pub type AclResult<T> = Result<T, AclError>;
