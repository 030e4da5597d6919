//! Create Products Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::catalog::data::NewProduct;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductDescriptionBody, ProductImageBody, ProductResponse, into_product_images},
    },
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,

    /// Name of an existing category
    #[serde(alias = "categoryName")]
    pub category: String,

    /// Price in pence/cents; must be positive
    pub price: u64,

    #[serde(default)]
    pub description: ProductDescriptionBody,

    #[serde(default)]
    pub images: Vec<ProductImageBody>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            name: request.name,
            category: request.category,
            price: request.price,
            description: request.description.into(),
            images: into_product_images(request.images),
        }
    }
}

/// One product, or several created together.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum CreateProductsRequest {
    Many(Vec<CreateProductRequest>),
    One(CreateProductRequest),
}

/// Created products, in the same shape as the request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum ProductsCreatedResponse {
    Many(Vec<ProductResponse>),
    One(ProductResponse),
}

/// Create Products Handler
///
/// Creates every product in the request, or none of them.
#[endpoint(
    tags("products"),
    summary = "Create Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Products created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(products_count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductsCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let (requests, single) = match json.into_inner() {
        CreateProductsRequest::One(request) => (vec![request], true),
        CreateProductsRequest::Many(requests) => (requests, false),
    };

    if requests.is_empty() {
        return Err(StatusError::bad_request().brief("No products given"));
    }

    tracing::Span::current().record("products_count", requests.len());

    let mut created = state
        .catalog
        .create_products(requests.into_iter().map(Into::into).collect())
        .await
        .map_err(into_status_error)?;

    tracing::info!(count = created.len(), "created products");

    if single && let Some(product) = created.pop() {
        res.add_header(LOCATION, format!("/products/id/{}", product.uuid), true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::CREATED);

        return Ok(Json(ProductsCreatedResponse::One(product.into())));
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(ProductsCreatedResponse::Many(
        created.into_iter().map(Into::into).collect(),
    )))
}
