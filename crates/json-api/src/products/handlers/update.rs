//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::catalog::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductDescriptionBody, ProductImageBody, ProductResponse, into_product_images},
    },
    state::State,
};

/// Update Product Request
///
/// Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,

    /// Name of an existing category
    #[serde(alias = "categoryName")]
    pub category: Option<String>,

    pub price: Option<u64>,

    pub description: Option<ProductDescriptionBody>,

    /// Replaces the whole image list
    pub images: Option<Vec<ProductImageBody>>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            category: request.category,
            price: request.price,
            description: request.description.map(Into::into),
            images: request.images.map(into_product_images),
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(name, json, depot),
    fields(
        product_name = tracing::field::Empty,
        price = tracing::field::Empty,
        images_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let name = name.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("product_name", tracing::field::display(&name));

    if let Some(price) = request.price {
        span.record("price", price);
    }

    if let Some(images) = &request.images {
        span.record("images_count", images.len());
    }

    let product = state
        .catalog
        .update_product(&name, request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product.uuid, price = product.price, "updated product");

    Ok(Json(product.into()))
}
