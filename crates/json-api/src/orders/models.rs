//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderCustomer, OrderLineRecord, OrderRecord};

use crate::products::models::ProductImageBody;

/// The user who placed an order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCustomerResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

impl From<OrderCustomer> for OrderCustomerResponse {
    fn from(customer: OrderCustomer) -> Self {
        OrderCustomerResponse {
            uuid: customer.uuid.into_uuid(),
            name: customer.name,
            email: customer.email,
        }
    }
}

/// One order line with its product resolved.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub product_uuid: Uuid,
    pub product_name: String,

    /// Current catalog price, in minor units
    pub product_price: u64,
    pub product_images: Vec<ProductImageBody>,
    pub quantity: u32,

    /// Price charged when the order was placed, in minor units
    pub unit_price: u64,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        OrderLineResponse {
            product_uuid: line.product_uuid.into_uuid(),
            product_name: line.product_name,
            product_price: line.product_price,
            product_images: line.product_images.into_iter().map(Into::into).collect(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// Order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub customer: OrderCustomerResponse,
    pub lines: Vec<OrderLineResponse>,
    pub location: String,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub total_amount: u64,

    /// One of `placed`, `processing`, `shipped`, `delivered`, `completed`, `cancelled`
    pub status: String,

    pub paid: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into_uuid(),
            customer: order.customer.into(),
            lines: order.lines.into_iter().map(Into::into).collect(),
            location: order.location,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total_amount: order.total_amount,
            status: order.status.as_str().to_string(),
            paid: order.paid,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        OrdersResponse {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}
