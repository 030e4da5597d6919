//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{auth::IssuedApiToken, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Capability level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Can browse the catalog and manage their own orders.
    #[default]
    Customer,

    /// Can additionally manage the catalog, all orders and other users' roles.
    Admin,
}

impl Role {
    /// Storage and wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }

    /// Whether this is [`Role::Admin`].
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognised role.
#[derive(Debug, Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// User Record
///
/// Never carries the password hash; see [`UserCredentialsRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// User id.
    pub uuid: UserUuid,
    /// Display name.
    pub name: String,
    /// Lower-cased and unique.
    pub email: String,
    /// Capability level.
    pub role: Role,
    /// Default delivery location.
    pub location: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last change.
    pub updated_at: Timestamp,
}

/// A newly created account and the token issued alongside it.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    /// The created customer.
    pub user: UserRecord,

    /// First bearer token for the account.
    pub token: IssuedApiToken,
}

/// A user together with the stored password verifier, used only during login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentialsRecord {
    pub user: UserRecord,
    pub password_hash: String,
}
