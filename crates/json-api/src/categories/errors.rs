//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Category already exists")
        }
        CatalogServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Category name is required")
        }
        CatalogServiceError::InvalidReference
        | CatalogServiceError::InvalidData
        | CatalogServiceError::TooManyImages
        | CatalogServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Invalid category payload")
        }
        CatalogServiceError::NotFound | CatalogServiceError::CategoryNotFound => {
            StatusError::not_found().brief("Category not found")
        }
        CatalogServiceError::Sql(source) => {
            error!("category storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
