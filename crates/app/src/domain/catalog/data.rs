//! Catalog Data

use crate::domain::catalog::records::{ProductDescription, ProductImages};

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Unique among live categories.
    pub name: String,
}

/// New Product Data
///
/// The category is referenced by name and must be live.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Unique among live products.
    pub name: String,

    /// Name of a live category.
    pub category: String,

    /// Minor units; must be positive.
    pub price: u64,

    /// Free-form attributes.
    pub description: ProductDescription,

    /// At most [`MAX_PRODUCT_IMAGES`](crate::domain::catalog::records::MAX_PRODUCT_IMAGES).
    pub images: ProductImages,
}

/// Product Update Data
///
/// `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    /// New name.
    pub name: Option<String>,

    /// Name of the new category.
    pub category: Option<String>,

    /// New price in minor units.
    pub price: Option<u64>,

    /// Replaces the whole description.
    pub description: Option<ProductDescription>,

    /// Replaces the whole image list.
    pub images: Option<ProductImages>,
}

/// An update addressed to a product by its current name.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetedProductUpdate {
    /// Current name of the live product.
    pub target: String,

    /// Changes to apply.
    pub update: ProductUpdate,
}
