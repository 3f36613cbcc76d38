//! Identifiers and the external reference entities used for authorization.
//!
//! Employees and organizations are owned by an upstream directory; this
//! service only reads them. Membership of an employee in an organization's
//! responsible set is the sole authorization primitive.

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(value: ::uuid::Uuid) -> Self {
                Self(value)
            }
        }
    };
}

pub(crate) use uuid_identifier;

uuid_identifier!(
    /// Stable identifier of an employee.
    EmployeeId
);

uuid_identifier!(
    /// Stable identifier of an organization.
    OrganizationId
);

/// Employee known to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Employee identifier.
    pub id: EmployeeId,
    /// Unique login name used by callers to identify themselves.
    pub username: String,
}

/// Organization known to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// Organization identifier.
    pub id: OrganizationId,
    /// Display name.
    pub name: String,
}
