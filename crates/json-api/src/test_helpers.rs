//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{Identity, MockAuthService},
    domain::{
        catalog::{
            MockCatalogService,
            records::{
                CategoryRecord, CategoryUuid, ProductDescription, ProductImages, ProductRecord,
                ProductUuid,
            },
        },
        orders::{
            MockOrdersService,
            records::{OrderCustomer, OrderLineRecord, OrderRecord, OrderStatus, OrderUuid},
        },
        users::{
            MockUsersService,
            records::{Role, UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER: Identity = Identity {
    user: UserUuid::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001)),
    role: Role::Customer,
};

pub(crate) const TEST_ADMIN: Identity = Identity {
    user: UserUuid::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0002)),
    role: Role::Admin,
};

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(TEST_CUSTOMER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_register().never();
    users.expect_login().never();
    users.expect_get_user().never();
    users.expect_promote_to_admin().never();

    users
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();
    auth.expect_issue_token().never();
    auth.expect_revoke_token().never();

    auth
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_list_categories().never();
    catalog.expect_get_category().never();
    catalog.expect_create_category().never();
    catalog.expect_rename_category().never();
    catalog.expect_delete_category().never();
    catalog.expect_list_products().never();
    catalog.expect_get_product().never();
    catalog.expect_get_product_by_uuid().never();
    catalog.expect_create_products().never();
    catalog.expect_update_product().never();
    catalog.expect_update_products().never();
    catalog.expect_delete_product().never();
    catalog.expect_delete_products().never();

    catalog
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_list_orders_for_user().never();
    orders.expect_list_all_orders().never();
    orders.expect_get_order().never();
    orders.expect_update_order_status().never();
    orders.expect_cancel_order().never();
    orders.expect_delete_order().never();

    orders
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(strict_users_mock()),
        Arc::new(auth),
        Arc::new(strict_catalog_mock()),
        Arc::new(strict_orders_mock()),
    ))
}

pub(crate) fn state_with_users(users: MockUsersService, auth: MockAuthService) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(users),
        Arc::new(auth),
        Arc::new(strict_catalog_mock()),
        Arc::new(strict_orders_mock()),
    ))
}

pub(crate) fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(strict_users_mock()),
        Arc::new(strict_auth_mock()),
        Arc::new(catalog),
        Arc::new(strict_orders_mock()),
    ))
}

pub(crate) fn state_with_auth_and_catalog(
    auth: MockAuthService,
    catalog: MockCatalogService,
) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(strict_users_mock()),
        Arc::new(auth),
        Arc::new(catalog),
        Arc::new(strict_orders_mock()),
    ))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    Arc::new(State::new(
        Arc::new(strict_users_mock()),
        Arc::new(strict_auth_mock()),
        Arc::new(strict_catalog_mock()),
        Arc::new(orders),
    ))
}

pub(crate) fn users_service(users: MockUsersService, auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_users(users, auth)))
            .push(route),
    )
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_catalog(catalog)))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_orders(orders)))
            .hoop(inject_customer)
            .push(route),
    )
}

pub(crate) fn admin_orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_orders(orders)))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn make_user(email: &str, role: Role) -> UserRecord {
    UserRecord {
        uuid: UserUuid::new(),
        name: "Ada".to_string(),
        email: email.to_string(),
        role,
        location: String::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_category(name: &str) -> CategoryRecord {
    CategoryRecord {
        uuid: CategoryUuid::new(),
        name: name.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(name: &str, price: u64) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        category_uuid: CategoryUuid::new(),
        category_name: "Tools".to_string(),
        price,
        description: ProductDescription::default(),
        images: ProductImages::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// An order for `identity` holding two units of a 100.00 product.
pub(crate) fn make_order(identity: Identity) -> OrderRecord {
    OrderRecord {
        uuid: OrderUuid::new(),
        customer: OrderCustomer {
            uuid: identity.user,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        },
        lines: vec![OrderLineRecord {
            position: 0,
            product_uuid: ProductUuid::new(),
            product_name: "Widget".to_string(),
            product_price: 10_000,
            product_images: ProductImages::new(),
            quantity: 2,
            unit_price: 10_000,
        }],
        location: "London".to_string(),
        subtotal: 20_000,
        delivery_fee: 2_000,
        total_amount: 22_000,
        status: OrderStatus::Placed,
        paid: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
