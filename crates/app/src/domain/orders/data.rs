//! Order Data

use crate::domain::orders::records::OrderUuid;

/// One requested cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    /// Name of a live product.
    pub product_name: String,
    /// Must be positive.
    pub quantity: u32,
}

/// A cart submitted for checkout. Prices are always looked up, never supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Requested lines.
    pub lines: Vec<NewOrderLine>,
    /// Delivery location.
    pub location: String,
}

/// Which order a status update applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderTarget {
    /// A specific order.
    Order(OrderUuid),

    /// The oldest order containing the named live product.
    ProductName(String),
}
