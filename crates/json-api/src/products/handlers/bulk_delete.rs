//! Delete Products By Name Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Names of the products to delete: a JSON array, or `{ "name": ... }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum DeleteProductsRequest {
    Many(Vec<String>),
    One { name: String },
}

/// Deleted Products Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeletedProductsResponse {
    pub message: String,
}

/// Delete Products By Name Handler
///
/// Deletes every named product, or none of them if any is missing.
#[endpoint(
    tags("products"),
    summary = "Delete Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Products deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.delete_many",
    skip(json, depot),
    fields(products_count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<DeleteProductsRequest>,
    depot: &mut Depot,
) -> Result<Json<DeletedProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let names = match json.into_inner() {
        DeleteProductsRequest::Many(names) => names,
        DeleteProductsRequest::One { name } => vec![name],
    };

    if names.is_empty() {
        return Err(StatusError::bad_request().brief("No products given"));
    }

    tracing::Span::current().record("products_count", names.len());

    state
        .catalog
        .delete_products(names.clone())
        .await
        .map_err(into_status_error)?;

    Ok(Json(DeletedProductsResponse {
        message: format!("Deleted products: {}", names.join(", ")),
    }))
}
