//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::TokenIssuer,
    database::Db,
    domain::users::{
        data::{LoginCredentials, NewUser, normalise_email},
        errors::UsersServiceError,
        passwords::{hash_password_blocking, verify_password_blocking},
        records::{RegisteredUser, Role, UserRecord, UserUuid},
        repository::{HashedNewUser, PgUsersRepository},
    },
};

/// PostgreSQL-backed [`UsersService`].
#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    tokens: TokenIssuer,
}

impl PgUsersService {
    /// Service over `db`. Registration issues its first token with `tokens`.
    #[must_use]
    pub fn new(db: Db, tokens: TokenIssuer) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            tokens,
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, user: NewUser) -> Result<RegisteredUser, UsersServiceError> {
        let name = user.name.trim().to_string();
        let email = normalise_email(&user.email);

        if name.is_empty() || email.is_empty() || user.password.is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        if !email.contains('@') {
            return Err(UsersServiceError::InvalidData);
        }

        let password_hash = hash_password_blocking(user.password).await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(
                &mut tx,
                HashedNewUser {
                    uuid: UserUuid::new(),
                    name,
                    email,
                    password_hash,
                    location: user.location.trim().to_string(),
                },
            )
            .await?;

        let token = self.tokens.issue(&mut tx, created.uuid).await?;

        tx.commit().await?;

        info!(user_uuid = %created.uuid, "registered user");

        Ok(RegisteredUser {
            user: created,
            token,
        })
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<UserRecord, UsersServiceError> {
        let email = normalise_email(&credentials.email);

        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .find_credentials_by_email(&mut tx, &email)
            .await?;

        tx.commit().await?;

        let Some(found) = found else {
            return Err(UsersServiceError::InvalidCredentials);
        };

        if !verify_password_blocking(credentials.password, found.password_hash).await? {
            return Err(UsersServiceError::InvalidCredentials);
        }

        Ok(found.user)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn promote_to_admin(&self, email: &str) -> Result<UserRecord, UsersServiceError> {
        let email = normalise_email(email);

        if email.is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let user = self.repository.lock_user_by_email(&mut tx, &email).await?;

        if user.role.is_admin() {
            return Err(UsersServiceError::AlreadyAdmin);
        }

        let promoted = self
            .repository
            .set_role(&mut tx, user.uuid, Role::Admin)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %promoted.uuid, "promoted user to admin");

        Ok(promoted)
    }
}

/// Accounts and roles.
#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a customer account together with its first bearer token, in one
    /// transaction. Emails are unique, case-insensitively.
    async fn register(&self, user: NewUser) -> Result<RegisteredUser, UsersServiceError>;

    /// Checks an email/password pair and returns the matching user.
    async fn login(&self, credentials: LoginCredentials) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Grants the admin role to the user with the given email.
    async fn promote_to_admin(&self, email: &str) -> Result<UserRecord, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query;
    use testresult::TestResult;
    use zeroize::Zeroizing;

    use crate::{
        auth::AuthService,
        test::{TestContext, helpers::new_user},
    };

    use super::*;

    fn login(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials {
            email: email.to_string(),
            password: Zeroizing::new(password.to_string()),
        }
    }

    #[tokio::test]
    async fn register_returns_customer_with_normalised_email() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register(new_user("Ada", " Ada@Example.com", "pw"))
            .await?
            .user;

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, Role::Customer);

        Ok(())
    }

    #[tokio::test]
    async fn register_issues_a_token_for_the_new_account() -> TestResult {
        let ctx = TestContext::new().await;

        let registered = ctx
            .users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?;

        let identity = ctx.auth.authenticate_bearer(&registered.token.token).await?;

        assert_eq!(identity.user, registered.user.uuid);
        assert_eq!(registered.token.metadata.user_uuid, registered.user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn register_keeps_no_user_when_token_cannot_be_stored() -> TestResult {
        let ctx = TestContext::new().await;

        query("DROP TABLE api_tokens").execute(ctx.db.pool()).await?;

        let result = ctx
            .users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::Token(_))),
            "expected Token error, got {result:?}"
        );

        let (users,): (i64,) = sqlx::query_as("SELECT count(*) FROM users")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(users, 0, "user row should roll back with the token");

        Ok(())
    }

    #[tokio::test]
    async fn register_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?;

        let result = ctx
            .users
            .register(new_user("Other Ada", "ADA@example.com", "pw2"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_without_password_returns_missing_required_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .register(new_user("Ada", "ada@example.com", ""))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn login_with_correct_password_returns_user() -> TestResult {
        let ctx = TestContext::new().await;

        let registered = ctx
            .users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?;

        let user = ctx.users.login(login("ADA@example.com", "pw")).await?;

        assert_eq!(user.uuid, registered.user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_returns_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?;

        let result = ctx.users.login(login("ada@example.com", "nope")).await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_unknown_email_returns_invalid_credentials() {
        let ctx = TestContext::new().await;

        let result = ctx.users.login(login("ghost@example.com", "pw")).await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[tokio::test]
    async fn promote_grants_admin_once() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register(new_user("Ada", "ada@example.com", "pw"))
            .await?;

        let promoted = ctx.users.promote_to_admin("ada@example.com").await?;

        assert_eq!(promoted.role, Role::Admin);

        let again = ctx.users.promote_to_admin("ada@example.com").await;

        assert!(
            matches!(again, Err(UsersServiceError::AlreadyAdmin)),
            "expected AlreadyAdmin, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn promote_unknown_email_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.promote_to_admin("ghost@example.com").await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
