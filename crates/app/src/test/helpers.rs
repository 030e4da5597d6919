//! Test Helpers

use smallvec::SmallVec;
use zeroize::Zeroizing;

use crate::{
    auth::Identity,
    domain::{
        catalog::{
            CatalogService, CatalogServiceError,
            data::{NewCategory, NewProduct},
            records::{CategoryRecord, ProductDescription, ProductRecord},
        },
        orders::data::{NewOrder, NewOrderLine},
        users::{UsersService, UsersServiceError, data::NewUser},
    },
    test::TestContext,
};

pub(crate) fn new_user(name: &str, email: &str, password: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: Zeroizing::new(password.to_string()),
        location: String::new(),
    }
}

pub(crate) async fn register_customer(
    ctx: &TestContext,
    email: &str,
) -> Result<Identity, UsersServiceError> {
    let user = ctx
        .users
        .register(new_user("Customer", email, "pw"))
        .await?
        .user;

    Ok(Identity {
        user: user.uuid,
        role: user.role,
    })
}

pub(crate) async fn register_admin(
    ctx: &TestContext,
    email: &str,
) -> Result<Identity, UsersServiceError> {
    ctx.users.register(new_user("Admin", email, "pw")).await?;

    let user = ctx.users.promote_to_admin(email).await?;

    Ok(Identity {
        user: user.uuid,
        role: user.role,
    })
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
) -> Result<CategoryRecord, CatalogServiceError> {
    ctx.catalog
        .create_category(NewCategory {
            name: name.to_string(),
        })
        .await
}

pub(crate) fn new_product(name: &str, category: &str, price: u64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: category.to_string(),
        price,
        description: ProductDescription::default(),
        images: SmallVec::new(),
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    category: &str,
    price: u64,
) -> Result<ProductRecord, CatalogServiceError> {
    let mut created = ctx
        .catalog
        .create_products(vec![new_product(name, category, price)])
        .await?;

    created.pop().ok_or(CatalogServiceError::NotFound)
}

pub(crate) fn cart(lines: &[(&str, u32)], location: &str) -> NewOrder {
    NewOrder {
        lines: lines
            .iter()
            .map(|(product_name, quantity)| NewOrderLine {
                product_name: (*product_name).to_string(),
                quantity: *quantity,
            })
            .collect(),
        location: location.to_string(),
    }
}
