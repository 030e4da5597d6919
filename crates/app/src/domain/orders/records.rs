//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        catalog::records::{ProductImages, ProductUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Where an order is in fulfilment.
///
/// Admins may move an order between any two statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Paid and waiting for fulfilment.
    #[default]
    Placed,
    /// Being prepared.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Closed.
    Completed,
    /// Cancelled by the customer or an admin.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in fulfilment order.
    pub const ALL: [Self; 6] = [
        Self::Placed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Storage and wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognised status.
#[derive(Debug, Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}

/// The user who placed an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCustomer {
    /// Customer id.
    pub uuid: UserUuid,
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
}

/// One line of an order, with the referenced product resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineRecord {
    /// Zero-based position in the cart.
    pub position: u32,
    /// Ordered product.
    pub product_uuid: ProductUuid,
    /// Current product name.
    pub product_name: String,

    /// Current catalog price, which may differ from `unit_price`.
    pub product_price: u64,
    /// Current product images.
    pub product_images: ProductImages,
    /// Units ordered.
    pub quantity: u32,

    /// Price charged at placement.
    pub unit_price: u64,
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    /// Order id.
    pub uuid: OrderUuid,
    /// Who placed the order.
    pub customer: OrderCustomer,
    /// Lines in cart order.
    pub lines: Vec<OrderLineRecord>,
    /// Delivery location.
    pub location: String,
    /// Sum of line amounts.
    pub subtotal: u64,
    /// Fee charged on top of the subtotal.
    pub delivery_fee: u64,
    /// Subtotal plus delivery fee.
    pub total_amount: u64,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Orders are paid at placement.
    pub paid: bool,
    /// Placement time.
    pub created_at: Timestamp,
    /// Last status change.
    pub updated_at: Timestamp,
}
