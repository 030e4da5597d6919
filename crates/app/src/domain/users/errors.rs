//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{auth::AuthServiceError, domain::users::passwords::PasswordError};

/// Users service errors.
#[derive(Debug, Error)]
pub enum UsersServiceError {
    /// Email already registered.
    #[error("user already exists")]
    AlreadyExists,

    /// No such user.
    #[error("user not found")]
    NotFound,

    /// Unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Promotion target is already an admin.
    #[error("user is already an admin")]
    AlreadyAdmin,

    /// Name, email or password was blank.
    #[error("missing required data")]
    MissingRequiredData,

    /// Malformed email or other invalid value.
    #[error("invalid data")]
    InvalidData,

    /// The registration token could not be issued.
    #[error("token issuing error")]
    Token(#[from] AuthServiceError),

    /// Password hashing failed.
    #[error("password processing error")]
    Password(#[from] PasswordError),

    /// Database failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
