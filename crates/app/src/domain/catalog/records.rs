//! Catalog Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::uuids::TypedUuid;

/// Most images a product can reference.
pub const MAX_PRODUCT_IMAGES: usize = 8;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product image list; never longer than [`MAX_PRODUCT_IMAGES`].
pub type ProductImages = SmallVec<[ProductImage; MAX_PRODUCT_IMAGES]>;

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    /// Category id.
    pub uuid: CategoryUuid,
    /// Unique among live categories.
    pub name: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last change.
    pub updated_at: Timestamp,
}

/// Free-form product attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescription {
    /// Size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Version or revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Anything else
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

/// Reference to an image held by external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Public URL
    pub url: String,
    /// Key in the image store
    pub storage_id: String,
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    /// Product id.
    pub uuid: ProductUuid,
    /// Unique among live products.
    pub name: String,
    /// Owning category.
    pub category_uuid: CategoryUuid,
    /// Name of the owning category, even if it was deleted.
    pub category_name: String,
    /// Minor units.
    pub price: u64,
    /// Free-form attributes.
    pub description: ProductDescription,
    /// Image references.
    pub images: ProductImages,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last change.
    pub updated_at: Timestamp,
    /// Set once soft-deleted.
    pub deleted_at: Option<Timestamp>,
}
