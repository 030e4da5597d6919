//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::catalog::{CatalogServiceError, records::MAX_PRODUCT_IMAGES};

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Product already exists")
        }
        CatalogServiceError::CategoryNotFound | CatalogServiceError::InvalidReference => {
            StatusError::bad_request().brief("Category not found")
        }
        CatalogServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Name, category and price are required")
        }
        CatalogServiceError::TooManyImages => StatusError::bad_request().brief(format!(
            "A product can have at most {MAX_PRODUCT_IMAGES} images"
        )),
        CatalogServiceError::InvalidData | CatalogServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        CatalogServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        CatalogServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
