//! S3 access-control-list builders.
//!
//! Declarative grant lists ([`AclConfig`]) become SDK
//! [`AccessControlPolicy`](aws_sdk_s3::types::AccessControlPolicy) values,
//! ready for a `PutObjectAcl`/`PutBucketAcl` call. Grants whose `grant` flag is
//! off are dropped; everything else is translated structurally, in declaration
//! order, without validating grantee identities. [`CannedAcl`] covers the
//! header-string form.

mod acl;
mod canned;
mod error;

pub use acl::{
    AclConfig, GrantConfig, GranteeConfig, OwnerConfig, ParsePermissionError, Permission,
};
pub use canned::{CannedAcl, ParseCannedAclError};
pub use error::{AclError, AclResult};
