//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, Identity, IssuedApiToken, ParsedApiToken, TokenIssuer,
        repository::PgAuthRepository,
    },
    database::Db,
    domain::users::records::UserUuid,
};

/// Default bearer token lifetime: seven days.
pub const DEFAULT_TOKEN_TTL_HOURS: u16 = 168;

/// PostgreSQL-backed [`AuthService`].
#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    issuer: TokenIssuer,
}

impl PgAuthService {
    /// Service over `db` that mints tokens with `issuer`.
    #[must_use]
    pub fn new(db: Db, issuer: TokenIssuer) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            issuer,
        }
    }

    async fn touch_last_used(&self, token_uuid: Uuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository
            .touch_api_token_last_used(&mut tx, token_uuid)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        let Ok(parsed) = bearer_token.parse::<ParsedApiToken>() else {
            return Err(AuthServiceError::Unauthorized);
        };

        let mut tx = self.db.begin().await?;

        let token = self
            .repository
            .find_active_api_token(&mut tx, parsed.token_uuid, parsed.version)
            .await?;

        tx.commit().await?;

        let Some(token) = token else {
            return Err(AuthServiceError::Unauthorized);
        };

        let verifier_input = parsed.verifier_input(token.user_uuid);

        if !self.issuer.signer().verify(&verifier_input, &token.token_hash)? {
            return Err(AuthServiceError::Unauthorized);
        }

        if let Err(error) = self.touch_last_used(parsed.token_uuid).await {
            warn!(token_uuid = %parsed.token_uuid, %error, "failed to record token use");
        }

        Ok(Identity {
            user: token.user_uuid,
            role: token.role,
        })
    }

    async fn issue_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let issued = self.issuer.issue(&mut tx, user).await?;

        tx.commit().await?;

        Ok(issued)
    }

    async fn revoke_token(&self, token_uuid: Uuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self
            .repository
            .revoke_api_token(&mut tx, token_uuid)
            .await?;

        tx.commit().await?;

        revoked.map(|_| ()).ok_or(AuthServiceError::NotFound)
    }
}

/// Bearer token authentication.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the calling identity.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;

    /// Issue a new token for `user`. The raw token is only ever returned here.
    async fn issue_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError>;

    /// Revoke an active token.
    async fn revoke_token(&self, token_uuid: Uuid) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query;
    use testresult::TestResult;

    use crate::{
        domain::users::{UsersService, records::Role},
        test::{TestContext, helpers::new_user},
    };

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_as_its_user() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?
            .user;

        let issued = ctx.auth.issue_token(user.uuid).await?;

        let identity = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(identity.user, user.uuid);
        assert_eq!(identity.role, Role::Customer);
        assert!(
            issued.metadata.expires_at > issued.metadata.created_at,
            "token should expire in the future"
        );

        Ok(())
    }

    #[tokio::test]
    async fn authentication_reflects_current_role() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?
            .user;

        let issued = ctx.auth.issue_token(user.uuid).await?;

        ctx.users.promote_to_admin("ada@example.com").await?;

        let identity = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(identity.role, Role::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_unauthorized() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("garbage").await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );
    }

    #[tokio::test]
    async fn tampered_secret_is_unauthorized() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?
            .user;

        let issued = ctx.auth.issue_token(user.uuid).await?;

        let head = issued.token.split('.').next().unwrap_or_default();
        let forged = format!("{head}.{}", "0".repeat(64));

        let result = ctx.auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_unauthorized() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?
            .user;

        let issued = ctx.auth.issue_token(user.uuid).await?;

        ctx.auth.revoke_token(issued.metadata.uuid).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        let again = ctx.auth.revoke_token(issued.metadata.uuid).await;

        assert!(
            matches!(again, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?
            .user;

        let issued = ctx.auth.issue_token(user.uuid).await?;

        query(
            "UPDATE api_tokens SET created_at = now() - interval '2 days', \
             expires_at = now() - interval '1 day' WHERE uuid = $1",
        )
        .bind(issued.metadata.uuid)
        .execute(ctx.db.pool())
        .await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn authentication_records_last_use() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?
            .user;

        let issued = ctx.auth.issue_token(user.uuid).await?;

        assert!(issued.metadata.last_used_at.is_none(), "fresh token used");

        ctx.auth.authenticate_bearer(&issued.token).await?;

        let (used,): (bool,) =
            sqlx::query_as("SELECT last_used_at IS NOT NULL FROM api_tokens WHERE uuid = $1")
                .bind(issued.metadata.uuid)
                .fetch_one(ctx.db.pool())
                .await?;

        assert!(used, "last_used_at should be set after authentication");

        Ok(())
    }
}
