//! User Handlers

pub(crate) mod login;
pub(crate) mod promote;
pub(crate) mod register;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use storefront_app::{
        auth::{ApiTokenMetadata, ApiTokenVersion, IssuedApiToken},
        domain::users::records::UserUuid,
    };
    use uuid::Uuid;

    pub(super) fn make_issued_token(user: UserUuid) -> IssuedApiToken {
        IssuedApiToken {
            token: "sf_v1_token".to_string(),
            metadata: ApiTokenMetadata {
                uuid: Uuid::now_v7(),
                user_uuid: user,
                version: ApiTokenVersion::V1,
                created_at: Timestamp::UNIX_EPOCH,
                expires_at: Timestamp::UNIX_EPOCH,
                last_used_at: None,
                revoked_at: None,
            },
        }
    }
}
