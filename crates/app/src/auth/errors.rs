//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::{ApiTokenError, SignerError};

/// Auth service errors.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Missing, malformed, expired, revoked or mismatched credential.
    #[error("invalid or expired token")]
    Unauthorized,

    /// No active token with that id.
    #[error("token not found")]
    NotFound,

    /// Database failure.
    #[error("storage error")]
    Sql(#[source] Error),

    /// Token could not be parsed or rendered.
    #[error("token processing error")]
    Token(#[from] ApiTokenError),

    /// Verifier could not be computed.
    #[error("token signing error")]
    Signer(#[from] SignerError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
