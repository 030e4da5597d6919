//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::ProductNotFound(name) => {
            StatusError::not_found().brief(format!("Product not found: {name}"))
        }
        OrdersServiceError::EmptyOrder => {
            StatusError::bad_request().brief("Order must contain at least one line")
        }
        OrdersServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive integer")
        }
        OrdersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Missing required order data")
        }
        OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order data"),
        OrdersServiceError::AmountOverflow(_) => {
            StatusError::bad_request().brief("Order amount is too large")
        }
        OrdersServiceError::Forbidden(denied) => StatusError::forbidden().brief(denied.to_string()),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
