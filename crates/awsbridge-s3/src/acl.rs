//! Grantee, grant and ACL builders.

use std::fmt;
use std::str::FromStr;

use aws_sdk_s3::types::{self as s3, AccessControlPolicy, Grant, Grantee, Owner, Type};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AclError;

const ALL_USERS_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";
const AUTHENTICATED_USERS_URI: &str = "http://acs.amazonaws.com/groups/global/AuthenticatedUsers";
const LOG_DELIVERY_URI: &str = "http://acs.amazonaws.com/groups/s3/LogDelivery";

// ---------------------------------------------------------------------------
// Grantee
// ---------------------------------------------------------------------------

/// The identity a grant applies to.
///
/// Identity fields are optional. A grantee without one is still translated,
/// producing an SDK grantee with no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GranteeConfig {
    /// An AWS account by canonical user id.
    CanonicalUser {
        /// The canonical user id.
        #[serde(default)]
        id: Option<String>,
    },
    /// An AWS account by e-mail address.
    #[serde(rename_all = "camelCase")]
    Email {
        /// The account e-mail address.
        #[serde(default)]
        email_address: Option<String>,
    },
    /// A predefined group by URI.
    Group {
        /// The group URI.
        #[serde(default)]
        uri: Option<String>,
    },
    /// Everyone, including anonymous requests.
    AllUsers,
    /// Any authenticated AWS account.
    AuthenticatedUsers,
    /// The S3 log delivery group.
    LogDelivery,
}

impl GranteeConfig {
    /// The identifying value, whichever field carries it for this kind.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::CanonicalUser { id } => id.as_deref(),
            Self::Email { email_address } => email_address.as_deref(),
            Self::Group { uri } => uri.as_deref(),
            Self::AllUsers => Some(ALL_USERS_URI),
            Self::AuthenticatedUsers => Some(AUTHENTICATED_USERS_URI),
            Self::LogDelivery => Some(LOG_DELIVERY_URI),
        }
    }

    /// Build the SDK grantee.
    ///
    /// # Errors
    ///
    /// Returns [`AclError::Build`] if the SDK rejects the value.
    pub fn create(&self) -> Result<Grantee, AclError> {
        if self.identifier().is_none() {
            warn!(grantee = ?self, "Grantee has no identity, passing it through unvalidated");
        }

        let builder = Grantee::builder();
        let builder = match self {
            Self::CanonicalUser { id } => builder.set_id(id.clone()).r#type(Type::CanonicalUser),
            Self::Email { email_address } => builder
                .set_email_address(email_address.clone())
                .r#type(Type::AmazonCustomerByEmail),
            Self::Group { uri } => builder.set_uri(uri.clone()).r#type(Type::Group),
            Self::AllUsers | Self::AuthenticatedUsers | Self::LogDelivery => builder
                .set_uri(self.identifier().map(ToOwned::to_owned))
                .r#type(Type::Group),
        };
        Ok(builder.build()?)
    }
}

// ---------------------------------------------------------------------------
// Permission
// ---------------------------------------------------------------------------

/// A permission that can be granted to a grantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// READ, WRITE, READ_ACP and WRITE_ACP together.
    FullControl,
    /// List the bucket or read the object.
    Read,
    /// Create objects in the bucket.
    Write,
    /// Read the ACL.
    ReadAcp,
    /// Write the ACL.
    WriteAcp,
}

impl Permission {
    /// The wire string, e.g. `FULL_CONTROL`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullControl => "FULL_CONTROL",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::ReadAcp => "READ_ACP",
            Self::WriteAcp => "WRITE_ACP",
        }
    }

    /// The SDK permission.
    #[must_use]
    pub fn to_sdk(self) -> s3::Permission {
        match self {
            Self::FullControl => s3::Permission::FullControl,
            Self::Read => s3::Permission::Read,
            Self::Write => s3::Permission::Write,
            Self::ReadAcp => s3::Permission::ReadAcp,
            Self::WriteAcp => s3::Permission::WriteAcp,
        }
    }
}

/// Error returned when parsing an unknown permission name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct ParsePermissionError(String);

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FULL_CONTROL" => Ok(Self::FullControl),
            "READ" => Ok(Self::Read),
            "WRITE" => Ok(Self::Write),
            "READ_ACP" => Ok(Self::ReadAcp),
            "WRITE_ACP" => Ok(Self::WriteAcp),
            other => Err(ParsePermissionError(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Grant / ACL
// ---------------------------------------------------------------------------

/// A grantee paired with a permission, and whether to include it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantConfig {
    /// Who receives the permission.
    pub grantee: GranteeConfig,
    /// The permission granted.
    pub permission: Permission,
    /// Only grants with this set are materialized.
    #[serde(default = "default_grant")]
    pub grant: bool,
}

fn default_grant() -> bool {
    true
}

impl GrantConfig {
    /// An included grant.
    #[must_use]
    pub fn new(grantee: GranteeConfig, permission: Permission) -> Self {
        Self {
            grantee,
            permission,
            grant: true,
        }
    }

    /// Set whether the grant is included.
    #[must_use]
    pub fn with_grant(mut self, grant: bool) -> Self {
        self.grant = grant;
        self
    }

    /// Whether this grant should be materialized.
    #[must_use]
    pub fn grant(&self) -> bool {
        self.grant
    }

    /// Build the SDK grant.
    ///
    /// # Errors
    ///
    /// Returns [`AclError::Build`] if the grantee cannot be built.
    pub fn create(&self) -> Result<Grant, AclError> {
        Ok(Grant::builder()
            .grantee(self.grantee.create()?)
            .permission(self.permission.to_sdk())
            .build())
    }
}

/// The owner recorded on an ACL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerConfig {
    /// Canonical user id of the owner.
    pub id: String,
}

/// An ordered list of grants with an optional owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclConfig {
    /// ACL owner.
    #[serde(default)]
    pub owner: Option<OwnerConfig>,
    /// Grants in declaration order.
    #[serde(default)]
    pub grants: Vec<GrantConfig>,
}

impl AclConfig {
    /// Create an ACL from grants.
    #[must_use]
    pub fn new(grants: Vec<GrantConfig>) -> Self {
        Self {
            owner: None,
            grants,
        }
    }

    /// Record an owner.
    #[must_use]
    pub fn with_owner(mut self, id: impl Into<String>) -> Self {
        self.owner = Some(OwnerConfig { id: id.into() });
        self
    }

    /// Build the SDK access control policy from the included grants.
    ///
    /// # Errors
    ///
    /// Returns [`AclError::Build`] if any grantee cannot be built.
    pub fn create(&self) -> Result<AccessControlPolicy, AclError> {
        let grants = self
            .grants
            .iter()
            .filter(|g| g.grant())
            .map(GrantConfig::create)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            configured = self.grants.len(),
            included = grants.len(),
            "Built S3 access control policy"
        );

        let owner = self
            .owner
            .as_ref()
            .map(|owner| Owner::builder().id(&owner.id).build());

        Ok(AccessControlPolicy::builder()
            .set_grants(Some(grants))
            .set_owner(owner)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(id: &str) -> GranteeConfig {
        GranteeConfig::CanonicalUser {
            id: Some(id.to_owned()),
        }
    }

    #[test]
    fn test_should_include_only_granted_entries() {
        let acl = AclConfig::new(vec![
            GrantConfig::new(canonical("excluded-user"), Permission::Read).with_grant(false),
            GrantConfig::new(canonical("included-user"), Permission::Read),
        ]);

        let policy = acl.create().unwrap();

        assert_eq!(policy.grants().len(), 1);
        let grant = &policy.grants()[0];
        assert_eq!(grant.grantee().and_then(Grantee::id), Some("included-user"));
        assert_eq!(grant.permission(), Some(&s3::Permission::Read));
    }

    #[test]
    fn test_should_keep_declaration_order() {
        let acl = AclConfig::new(vec![
            GrantConfig::new(canonical("a"), Permission::FullControl),
            GrantConfig::new(GranteeConfig::AllUsers, Permission::Read),
            GrantConfig::new(canonical("b"), Permission::WriteAcp),
        ]);

        let policy = acl.create().unwrap();

        let permissions: Vec<_> = policy
            .grants()
            .iter()
            .filter_map(Grant::permission)
            .cloned()
            .collect();
        assert_eq!(
            permissions,
            vec![
                s3::Permission::FullControl,
                s3::Permission::Read,
                s3::Permission::WriteAcp
            ]
        );
    }

    #[test]
    fn test_should_pass_through_grantee_without_identifier() {
        // Missing identities are not validated; the grant is still produced.
        let acl = AclConfig::new(vec![GrantConfig::new(
            GranteeConfig::CanonicalUser { id: None },
            Permission::Write,
        )]);

        let policy = acl.create().unwrap();

        assert_eq!(policy.grants().len(), 1);
        let grantee = policy.grants()[0].grantee().unwrap();
        assert!(grantee.id().is_none());
        assert_eq!(grantee.r#type(), &Type::CanonicalUser);
    }

    #[test]
    fn test_should_build_each_grantee_kind() {
        let email = GranteeConfig::Email {
            email_address: Some("ops@example.com".to_owned()),
        }
        .create()
        .unwrap();
        assert_eq!(email.email_address(), Some("ops@example.com"));
        assert_eq!(email.r#type(), &Type::AmazonCustomerByEmail);

        let group = GranteeConfig::LogDelivery.create().unwrap();
        assert_eq!(group.uri(), Some(LOG_DELIVERY_URI));
        assert_eq!(group.r#type(), &Type::Group);

        let custom = GranteeConfig::Group {
            uri: Some(ALL_USERS_URI.to_owned()),
        }
        .create()
        .unwrap();
        assert_eq!(custom.uri(), Some(ALL_USERS_URI));
    }

    #[test]
    fn test_should_record_owner() {
        let policy = AclConfig::default().with_owner("owner-id").create().unwrap();
        assert!(policy.grants().is_empty());
        assert_eq!(policy.owner().and_then(Owner::id), Some("owner-id"));
    }

    #[test]
    fn test_should_deserialize_acl_config() {
        let acl: AclConfig = serde_json::from_str(
            r#"{
                "owner": {"id": "owner-id"},
                "grants": [
                    {"grantee": {"type": "canonical-user", "id": "u1"}, "permission": "FULL_CONTROL"},
                    {"grantee": {"type": "email", "emailAddress": "x@example.com"},
                     "permission": "READ_ACP", "grant": false},
                    {"grantee": {"type": "all-users"}, "permission": "READ"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(acl.grants.len(), 3);
        assert!(acl.grants[0].grant());
        assert!(!acl.grants[1].grant());
        assert_eq!(acl.create().unwrap().grants().len(), 2);
    }

    #[test]
    fn test_should_roundtrip_permission_strings() {
        for permission in [
            Permission::FullControl,
            Permission::Read,
            Permission::Write,
            Permission::ReadAcp,
            Permission::WriteAcp,
        ] {
            assert_eq!(permission.to_string().parse::<Permission>(), Ok(permission));
        }
        let err = "EXECUTE".parse::<Permission>().unwrap_err();
        assert_eq!(err.to_string(), "unknown permission: EXECUTE");
    }
}
