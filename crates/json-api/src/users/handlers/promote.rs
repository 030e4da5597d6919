//! Promote User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Promote User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoteUserRequest {
    pub email: String,
}

/// Promote User Handler
///
/// Grants the admin role to an existing user.
#[endpoint(
    tags("users"),
    summary = "Promote User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User promoted"),
        (status_code = StatusCode::BAD_REQUEST, description = "User is already an admin"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "users.promote",
    skip(json, depot),
    fields(actor_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PromoteUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    tracing::Span::current().record("actor_uuid", tracing::field::display(actor.user));

    let user = state
        .users
        .promote_to_admin(&json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user.uuid, "promoted user to admin");

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        auth::MockAuthService,
        domain::users::{MockUsersService, UsersServiceError, records::Role},
    };

    use crate::test_helpers::{inject_admin, make_user, state_with_users};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        Service::new(
            Router::new()
                .hoop(salvo::affix_state::inject(state_with_users(
                    users,
                    MockAuthService::new(),
                )))
                .hoop(inject_admin)
                .push(Router::with_path("users/promote").put(handler)),
        )
    }

    #[tokio::test]
    async fn test_promote_returns_admin() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_promote_to_admin()
            .once()
            .withf(|email| email == "bob@example.com")
            .return_once(|email| Ok(make_user(email, Role::Admin)));

        let mut res = TestClient::put("http://example.com/users/promote")
            .json(&json!({ "email": "bob@example.com" }))
            .send(&make_service(users))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.role, "admin");

        Ok(())
    }

    #[tokio::test]
    async fn test_promote_unknown_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_promote_to_admin()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::put("http://example.com/users/promote")
            .json(&json!({ "email": "nobody@example.com" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_promote_existing_admin_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_promote_to_admin()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyAdmin));

        let res = TestClient::put("http://example.com/users/promote")
            .json(&json!({ "email": "root@example.com" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
