//! App Router

use salvo::Router;

use crate::{
    auth::middleware::{authenticate, require_admin},
    categories, healthcheck, observability, orders, products, users,
};

/// Every route, without the global hoops.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(users_router())
        .push(categories_router())
        .push(products_router())
        .push(orders_router())
}

fn users_router() -> Router {
    Router::with_path("users")
        .push(Router::with_path("register").post(users::register::handler))
        .push(Router::with_path("login").post(users::login::handler))
        .push(
            Router::with_path("promote")
                .hoop(authenticate)
                .hoop(require_admin)
                .put(users::promote::handler),
        )
}

fn categories_router() -> Router {
    Router::with_path("categories")
        .get(categories::index::handler)
        .push(Router::with_path("{name}").get(categories::get::handler))
        .push(
            Router::new()
                .hoop(authenticate)
                .hoop(require_admin)
                .post(categories::create::handler)
                .push(
                    Router::with_path("{name}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(Router::with_path("id/{uuid}").get(products::get_by_uuid::handler))
        .push(Router::with_path("{name}").get(products::get::handler))
        .push(
            Router::new()
                .hoop(authenticate)
                .hoop(require_admin)
                .post(products::create::handler)
                .put(products::bulk_update::handler)
                .delete(products::bulk_delete::handler)
                .push(
                    Router::with_path("{name}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .hoop(authenticate)
        .post(orders::create::handler)
        .get(orders::index::handler)
        .push(Router::with_path("my").get(orders::my::handler))
        .push(Router::with_path("status").put(orders::status::handler))
        .push(
            Router::with_path("{order}")
                .get(orders::get::handler)
                .delete(orders::delete::handler)
                .push(Router::with_path("cancel").put(orders::cancel::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        Service,
        affix_state::inject,
        http::{StatusCode, header::AUTHORIZATION},
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{auth::MockAuthService, domain::catalog::MockCatalogService};

    use crate::{
        catcher::{ErrorResponse, catcher},
        test_helpers::{
            TEST_ADMIN, TEST_CUSTOMER, make_product, state_with_auth, state_with_auth_and_catalog,
            state_with_catalog,
        },
    };

    use super::*;

    #[tokio::test]
    async fn test_product_reads_are_public() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .withf(|name| name == "Widget")
            .return_once(|name| Ok(make_product(name, 10_000)));

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_catalog(catalog)))
                .push(app_router()),
        );

        let res = TestClient::get("http://example.com/products/Widget")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_product_writes_require_token() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_catalog(MockCatalogService::new())))
                .push(app_router()),
        )
        .catcher(catcher());

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Widget", "category": "Tools", "price": 1 }))
            .send(&service)
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert!(!body.message.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_deletes_products_by_body_on_collection_path() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(TEST_ADMIN));

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_delete_products()
            .once()
            .withf(|names| *names == vec!["Widget".to_string()])
            .return_once(|_| Ok(()));

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_auth_and_catalog(auth, catalog)))
                .push(app_router()),
        );

        let res = TestClient::delete("http://example.com/products")
            .add_header(AUTHORIZATION, "Bearer sf_v1_admin", true)
            .json(&json!(["Widget"]))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_create_category() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(TEST_CUSTOMER));

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .push(app_router()),
        );

        let res = TestClient::post("http://example.com/categories")
            .add_header(AUTHORIZATION, "Bearer sf_v1_customer", true)
            .json(&json!({ "name": "Tools" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_orders_require_token() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_auth(MockAuthService::new())))
                .push(app_router()),
        );

        let res = TestClient::get("http://example.com/orders/my")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_token_reaches_promote() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(TEST_ADMIN));

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .push(app_router()),
        );

        let res = TestClient::put("http://example.com/users/promote")
            .add_header(AUTHORIZATION, "Bearer sf_v1_admin", true)
            .json(&json!({}))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
