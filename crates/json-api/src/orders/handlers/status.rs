//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{data::OrderTarget, records::OrderStatus};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Update Order Status Request
///
/// Exactly one of `orderId` and `productName` must be given. A product
/// name targets the oldest order containing that product.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    #[serde(rename = "orderId", alias = "order_uuid", default)]
    pub order_id: Option<Uuid>,

    #[serde(rename = "productName", alias = "product_name", default)]
    pub product_name: Option<String>,

    /// One of `placed`, `processing`, `shipped`, `delivered`, `completed`, `cancelled`
    pub status: String,
}

impl UpdateOrderStatusRequest {
    fn into_parts(self) -> Result<(OrderTarget, OrderStatus), StatusError> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        let target = match (self.order_id, self.product_name) {
            (Some(order), None) => OrderTarget::Order(order.into()),
            (None, Some(name)) => OrderTarget::ProductName(name),
            (None, None) | (Some(_), Some(_)) => {
                return Err(StatusError::bad_request()
                    .brief("Give exactly one of orderId or productName"));
            }
        };

        Ok((target, status))
    }
}

/// Update Order Status Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or product not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(json, depot),
    fields(status = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let (target, status) = json.into_inner().into_parts()?;

    let span = tracing::Span::current();

    span.record("status", status.as_str());

    let order = state
        .orders
        .update_order_status(identity, target, status)
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));

    tracing::info!(order_uuid = %order.uuid, status = %order.status, "updated order status");

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        auth::AccessDenied,
        domain::orders::{MockOrdersService, OrdersServiceError},
    };

    use crate::test_helpers::{
        TEST_ADMIN, TEST_CUSTOMER, admin_orders_service, make_order, orders_service,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("orders/status").put(handler)
    }

    #[tokio::test]
    async fn test_admin_ships_order_by_uuid() -> TestResult {
        let mut order = make_order(TEST_CUSTOMER);
        order.status = OrderStatus::Shipped;
        let uuid = order.uuid;

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .withf(move |identity, target, status| {
                *identity == TEST_ADMIN
                    && *target == OrderTarget::Order(uuid)
                    && *status == OrderStatus::Shipped
            })
            .return_once(move |_, _, _| Ok(order));

        let mut res = TestClient::put("http://example.com/orders/status")
            .json(&json!({ "orderId": uuid.into_uuid(), "status": "shipped" }))
            .send(&admin_orders_service(orders, route()))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "shipped");

        Ok(())
    }

    #[tokio::test]
    async fn test_targets_order_by_product_name() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .withf(|_, target, status| {
                *target == OrderTarget::ProductName("Widget".to_string())
                    && *status == OrderStatus::Delivered
            })
            .return_once(|_, _, status| {
                let mut order = make_order(TEST_CUSTOMER);
                order.status = status;

                Ok(order)
            });

        let res = TestClient::put("http://example.com/orders/status")
            .json(&json!({ "productName": "Widget", "status": "delivered" }))
            .send(&admin_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_accepts_snake_case_targets() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .withf(move |_, target, _| *target == OrderTarget::Order(uuid.into()))
            .return_once(|_, _, _| Ok(make_order(TEST_CUSTOMER)));

        let res = TestClient::put("http://example.com/orders/status")
            .json(&json!({ "order_uuid": uuid, "status": "processing" }))
            .send(&admin_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order_status().never();

        let res = TestClient::put("http://example.com/orders/status")
            .json(&json!({ "productName": "Widget", "status": "lost" }))
            .send(&admin_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_both_targets_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order_status().never();

        let res = TestClient::put("http://example.com/orders/status")
            .json(&json!({
                "orderId": Uuid::now_v7(),
                "productName": "Widget",
                "status": "shipped",
            }))
            .send(&admin_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_no_target_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order_status().never();

        let res = TestClient::put("http://example.com/orders/status")
            .json(&json!({ "status": "shipped" }))
            .send(&admin_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden(AccessDenied)));

        let res = TestClient::put("http://example.com/orders/status")
            .json(&json!({ "orderId": Uuid::now_v7(), "status": "shipped" }))
            .send(&orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::ProductNotFound("Nope".to_string())));

        let res = TestClient::put("http://example.com/orders/status")
            .json(&json!({ "productName": "Nope", "status": "shipped" }))
            .send(&admin_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
