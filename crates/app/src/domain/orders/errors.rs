//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{auth::AccessDenied, domain::orders::pricing::AmountOverflow};

/// Orders service errors.
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// No such order, or no order matches the product.
    #[error("order not found")]
    NotFound,

    /// A named product is unknown or deleted.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// The cart has no lines.
    #[error("order has no lines")]
    EmptyOrder,

    /// A quantity was zero.
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    /// A required field was blank.
    #[error("missing required data")]
    MissingRequiredData,

    /// A value failed a storage check.
    #[error("invalid data")]
    InvalidData,

    /// The caller may not touch this order.
    #[error("access denied")]
    Forbidden(#[from] AccessDenied),

    /// Totals exceed the representable range.
    #[error("order amount overflow")]
    AmountOverflow(#[from] AmountOverflow),

    /// Database failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<std::num::TryFromIntError> for OrdersServiceError {
    fn from(_: std::num::TryFromIntError) -> Self {
        Self::AmountOverflow(AmountOverflow)
    }
}
