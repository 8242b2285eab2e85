//! Canned ACLs.

use std::fmt;
use std::str::FromStr;

use aws_sdk_s3::types::ObjectCannedAcl;
use serde::{Deserialize, Serialize};

/// A predefined grant set S3 can apply in place of an explicit ACL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CannedAcl {
    /// Owner gets `FULL_CONTROL`.
    #[default]
    Private,
    /// Owner `FULL_CONTROL`, all users `READ`.
    PublicRead,
    /// Owner `FULL_CONTROL`, all users `READ` and `WRITE`.
    PublicReadWrite,
    /// Owner `FULL_CONTROL`, authenticated users `READ`.
    AuthenticatedRead,
    /// Owner `FULL_CONTROL`, EC2 gets `READ` for AMI bundles.
    AwsExecRead,
    /// Object owner `FULL_CONTROL`, bucket owner `READ`.
    BucketOwnerRead,
    /// Object and bucket owner both get `FULL_CONTROL`.
    BucketOwnerFullControl,
}

/// Error returned when parsing an unknown canned ACL name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown canned ACL: {0}")]
pub struct ParseCannedAclError(String);

impl CannedAcl {
    /// The header value, e.g. `public-read`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AuthenticatedRead => "authenticated-read",
            Self::AwsExecRead => "aws-exec-read",
            Self::BucketOwnerRead => "bucket-owner-read",
            Self::BucketOwnerFullControl => "bucket-owner-full-control",
        }
    }

    /// The SDK value for `PutObject`'s `acl` field.
    #[must_use]
    pub fn to_object_acl(self) -> ObjectCannedAcl {
        match self {
            Self::Private => ObjectCannedAcl::Private,
            Self::PublicRead => ObjectCannedAcl::PublicRead,
            Self::PublicReadWrite => ObjectCannedAcl::PublicReadWrite,
            Self::AuthenticatedRead => ObjectCannedAcl::AuthenticatedRead,
            Self::AwsExecRead => ObjectCannedAcl::AwsExecRead,
            Self::BucketOwnerRead => ObjectCannedAcl::BucketOwnerRead,
            Self::BucketOwnerFullControl => ObjectCannedAcl::BucketOwnerFullControl,
        }
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CannedAcl {
    type Err = ParseCannedAclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "public-read" => Ok(Self::PublicRead),
            "public-read-write" => Ok(Self::PublicReadWrite),
            "authenticated-read" => Ok(Self::AuthenticatedRead),
            "aws-exec-read" => Ok(Self::AwsExecRead),
            "bucket-owner-read" => Ok(Self::BucketOwnerRead),
            "bucket-owner-full-control" => Ok(Self::BucketOwnerFullControl),
            other => Err(ParseCannedAclError(other.to_owned())),
        }
    }
}
