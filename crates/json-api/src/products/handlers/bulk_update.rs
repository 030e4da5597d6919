//! Update Products By Name Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::catalog::data::{ProductUpdate, TargetedProductUpdate};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductDescriptionBody, ProductImageBody, ProductResponse, into_product_images},
    },
    state::State,
};

/// One product update, addressed by the product's current name.
///
/// Omitted fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TargetedUpdateRequest {
    #[serde(rename = "targetName", alias = "target_name")]
    pub target_name: String,

    pub name: Option<String>,

    /// Name of an existing category
    #[serde(rename = "categoryName", alias = "category")]
    pub category: Option<String>,

    pub price: Option<u64>,

    pub description: Option<ProductDescriptionBody>,

    /// Replaces the whole image list
    pub images: Option<Vec<ProductImageBody>>,
}

impl From<TargetedUpdateRequest> for TargetedProductUpdate {
    fn from(request: TargetedUpdateRequest) -> Self {
        TargetedProductUpdate {
            target: request.target_name,
            update: ProductUpdate {
                name: request.name,
                category: request.category,
                price: request.price,
                description: request.description.map(Into::into),
                images: request.images.map(into_product_images),
            },
        }
    }
}

/// One update, or several applied together.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum UpdateProductsRequest {
    Many(Vec<TargetedUpdateRequest>),
    One(TargetedUpdateRequest),
}

/// Updated products, in the same shape as the request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum ProductsUpdatedResponse {
    Many(Vec<ProductResponse>),
    One(ProductResponse),
}

/// Update Products By Name Handler
///
/// Applies every update in the request, or none of them.
#[endpoint(
    tags("products"),
    summary = "Update Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Products updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update_many",
    skip(json, depot),
    fields(products_count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProductsRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductsUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let (requests, single) = match json.into_inner() {
        UpdateProductsRequest::One(request) => (vec![request], true),
        UpdateProductsRequest::Many(requests) => (requests, false),
    };

    if requests.is_empty() {
        return Err(StatusError::bad_request().brief("No products given"));
    }

    tracing::Span::current().record("products_count", requests.len());

    let mut updated = state
        .catalog
        .update_products(requests.into_iter().map(Into::into).collect())
        .await
        .map_err(into_status_error)?;

    if single && let Some(product) = updated.pop() {
        return Ok(Json(ProductsUpdatedResponse::One(product.into())));
    }

    Ok(Json(ProductsUpdatedResponse::Many(
        updated.into_iter().map(Into::into).collect(),
    )))
}
