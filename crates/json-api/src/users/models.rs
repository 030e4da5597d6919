//! User Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::IssuedApiToken, domain::users::records::UserRecord};

/// User
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,

    /// `customer` or `admin`
    pub role: String,
    pub location: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
            location: user.location,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// A user together with a freshly issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthenticatedUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub location: String,
    pub is_admin: bool,

    /// Send as `Authorization: Bearer <token>`. Shown only once.
    pub token: String,

    /// When the token stops being accepted
    pub token_expires_at: String,
}

impl AuthenticatedUserResponse {
    pub(crate) fn new(user: UserRecord, issued: IssuedApiToken) -> Self {
        Self {
            id: user.uuid.into(),
            name: user.name,
            email: user.email,
            location: user.location,
            is_admin: user.role.is_admin(),
            token: issued.token,
            token_expires_at: issued.metadata.expires_at.to_string(),
        }
    }
}
