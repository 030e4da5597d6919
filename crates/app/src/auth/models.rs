//! Auth data models.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::ApiTokenVersion,
    domain::users::records::{Role, UserUuid},
};

/// The authenticated caller attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// The calling user.
    pub user: UserUuid,

    /// Role as stored when the token was checked.
    pub role: Role,
}

impl Identity {
    /// Whether the caller may use admin-only operations.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Stored token row joined with its owner's current role.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub user_uuid: UserUuid,
    pub role: Role,

    /// HMAC verifier for the token secret.
    pub token_hash: String,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    /// Token id, embedded in the raw token.
    pub uuid: Uuid,

    /// Owner of the token.
    pub user_uuid: UserUuid,

    /// Token format version.
    pub version: ApiTokenVersion,

    /// When the token was issued.
    pub created_at: Timestamp,

    /// After this instant the token is rejected.
    pub expires_at: Timestamp,

    /// Last successful authentication, if any.
    pub last_used_at: Option<Timestamp>,

    /// Set once the token is revoked.
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub ttl_hours: i32,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    /// Raw bearer token. Only the verifier is stored.
    pub token: String,

    /// Stored metadata for the token.
    pub metadata: ApiTokenMetadata,
}
