//! Catalog service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Catalog service errors.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// A live category or product already has the name.
    #[error("name already in use")]
    AlreadyExists,

    /// No live category or product with the name.
    #[error("not found")]
    NotFound,

    /// The referenced category does not exist or was deleted.
    #[error("category not found")]
    CategoryNotFound,

    /// A foreign key did not resolve.
    #[error("related resource not found")]
    InvalidReference,

    /// A required field was blank or the batch was empty.
    #[error("missing required data")]
    MissingRequiredData,

    /// A value failed validation, such as a zero price.
    #[error("invalid data")]
    InvalidData,

    /// More than [`MAX_PRODUCT_IMAGES`](crate::domain::catalog::records::MAX_PRODUCT_IMAGES) images.
    #[error("too many images")]
    TooManyImages,

    /// Price does not fit the storage column.
    #[error("invalid price value")]
    InvalidPrice(#[from] TryFromIntError),

    /// Database failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CatalogServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
