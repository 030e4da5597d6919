//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::records::{
    ProductDescription, ProductImage, ProductImages, ProductRecord,
};

/// Free-form product attributes.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDescriptionBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl From<ProductDescriptionBody> for ProductDescription {
    fn from(body: ProductDescriptionBody) -> Self {
        ProductDescription {
            size: body.size,
            model: body.model,
            version: body.version,
            other: body.other,
        }
    }
}

impl From<ProductDescription> for ProductDescriptionBody {
    fn from(description: ProductDescription) -> Self {
        ProductDescriptionBody {
            size: description.size,
            model: description.model,
            version: description.version,
            other: description.other,
        }
    }
}

/// Reference to an image held by external storage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductImageBody {
    pub url: String,
    pub storage_id: String,
}

impl From<ProductImageBody> for ProductImage {
    fn from(body: ProductImageBody) -> Self {
        ProductImage {
            url: body.url,
            storage_id: body.storage_id,
        }
    }
}

impl From<ProductImage> for ProductImageBody {
    fn from(image: ProductImage) -> Self {
        ProductImageBody {
            url: image.url,
            storage_id: image.storage_id,
        }
    }
}

pub(crate) fn into_product_images(images: Vec<ProductImageBody>) -> ProductImages {
    images.into_iter().map(Into::into).collect()
}

/// Product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,

    pub category_uuid: Uuid,

    pub category_name: String,

    /// The price of the product in pence/cents
    pub price: u64,

    pub description: ProductDescriptionBody,

    pub images: Vec<ProductImageBody>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            category_uuid: product.category_uuid.into(),
            category_name: product.category_name,
            price: product.price,
            description: product.description.into(),
            images: product.images.into_iter().map(Into::into).collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
