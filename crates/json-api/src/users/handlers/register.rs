//! Register User Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::data::NewUser;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::AuthenticatedUserResponse},
};

/// Register User Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,

    /// Default delivery location
    #[serde(default)]
    pub location: String,
}

impl fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl From<RegisterUserRequest> for NewUser {
    fn from(request: RegisterUserRequest) -> Self {
        NewUser {
            name: request.name,
            email: request.email,
            password: request.password.into(),
            location: request.location,
        }
    }
}

/// Register User Handler
///
/// Creates a customer account and returns it with a bearer token.
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields or email taken"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "users.register",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthenticatedUserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let registered = state
        .users
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record(
        "user_uuid",
        tracing::field::display(registered.user.uuid),
    );

    res.status_code(StatusCode::CREATED);

    Ok(Json(AuthenticatedUserResponse::new(
        registered.user,
        registered.token,
    )))
}
