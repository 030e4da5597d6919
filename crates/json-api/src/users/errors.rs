//! User Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::{auth::AuthServiceError, domain::users::UsersServiceError};

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Email is already registered")
        }
        UsersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Name, email and password are required")
        }
        UsersServiceError::InvalidData => StatusError::bad_request().brief("Invalid user payload"),
        UsersServiceError::AlreadyAdmin => {
            StatusError::bad_request().brief("User is already an admin")
        }
        UsersServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::Token(source) => token_status_error(source),
        UsersServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Token issuance only fails on infrastructure errors.
pub(crate) fn token_status_error(error: AuthServiceError) -> StatusError {
    error!("failed to issue api token: {error}");

    StatusError::internal_server_error()
}
