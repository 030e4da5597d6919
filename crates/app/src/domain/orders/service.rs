//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    auth::{Identity, authorize_admin, authorize_owner_or_admin},
    database::Db,
    domain::orders::{
        data::{NewOrder, OrderTarget},
        errors::OrdersServiceError,
        pricing::order_totals,
        records::{OrderRecord, OrderStatus, OrderUuid},
        repository::{OrderInsert, OrderLinesInsert, PgOrdersRepository},
    },
};

/// PostgreSQL-backed [`OrdersService`].
#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    /// Service over `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }

    /// Locks the order row and checks the caller may act on it.
    async fn lock_owned_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        identity: &Identity,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError> {
        let owner = self
            .repository
            .lock_order_owner(tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        authorize_owner_or_admin(identity, owner)?;

        Ok(())
    }

    async fn resolve_target(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        target: OrderTarget,
    ) -> Result<OrderUuid, OrdersServiceError> {
        match target {
            OrderTarget::Order(order) => {
                self.repository
                    .lock_order_owner(tx, order)
                    .await?
                    .ok_or(OrdersServiceError::NotFound)?;

                Ok(order)
            }
            OrderTarget::ProductName(name) => {
                if !self.repository.product_is_live(tx, &name).await? {
                    return Err(OrdersServiceError::ProductNotFound(name));
                }

                self.repository
                    .lock_oldest_order_with_product(tx, &name)
                    .await?
                    .ok_or(OrdersServiceError::NotFound)
            }
        }
    }

    async fn fetch_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.repository
            .get_order(tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        identity: Identity,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if order.lines.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        if order.lines.iter().any(|line| line.quantity == 0) {
            return Err(OrdersServiceError::InvalidQuantity);
        }

        if order.lines.iter().any(|line| line.product_name.is_empty()) {
            return Err(OrdersServiceError::MissingRequiredData);
        }

        let mut names: Vec<String> = order
            .lines
            .iter()
            .map(|line| line.product_name.clone())
            .collect();

        names.sort_unstable();
        names.dedup();

        let mut tx = self.db.begin().await?;

        let products: FxHashMap<String, _> = self
            .repository
            .lock_products_by_name(&mut tx, &names)
            .await?
            .into_iter()
            .map(|product| (product.name.clone(), product))
            .collect();

        let mut resolved = Vec::with_capacity(order.lines.len());

        for line in &order.lines {
            let product = products
                .get(&line.product_name)
                .ok_or_else(|| OrdersServiceError::ProductNotFound(line.product_name.clone()))?;

            resolved.push((product, line.quantity));
        }

        let totals = order_totals(
            resolved
                .iter()
                .map(|(product, quantity)| (product.price, *quantity)),
        )?;

        let mut lines = OrderLinesInsert::default();

        for (position, (product, quantity)) in resolved.iter().enumerate() {
            lines.positions.push(i32::try_from(position)?);
            lines.products.push(product.uuid.into_uuid());
            lines.quantities.push(i32::try_from(*quantity)?);
            lines.unit_prices.push(i64::try_from(product.price)?);
        }

        let uuid = OrderUuid::new();

        self.repository
            .create_order(
                &mut tx,
                OrderInsert {
                    uuid,
                    user: identity.user,
                    location: order.location.trim().to_string(),
                    subtotal: i64::try_from(totals.subtotal)?,
                    delivery_fee: i64::try_from(totals.delivery_fee)?,
                    total_amount: i64::try_from(totals.total_amount)?,
                    status: OrderStatus::Placed,
                    paid: true,
                },
                lines,
            )
            .await?;

        let placed = self.fetch_order(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(
            order_uuid = %placed.uuid,
            user_uuid = %identity.user,
            total_amount = placed.total_amount,
            "placed order"
        );

        Ok(placed)
    }

    async fn list_orders_for_user(
        &self,
        identity: Identity,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .list_orders_for_user(&mut tx, identity.user)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_all_orders(
        &self,
        identity: Identity,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        authorize_admin(&identity)?;

        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_all_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        identity: Identity,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.fetch_order(&mut tx, order).await?;

        tx.commit().await?;

        authorize_owner_or_admin(&identity, record.customer.uuid)?;

        Ok(record)
    }

    async fn update_order_status(
        &self,
        identity: Identity,
        target: OrderTarget,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        authorize_admin(&identity)?;

        let mut tx = self.db.begin().await?;

        let order = self.resolve_target(&mut tx, target).await?;

        self.repository
            .set_order_status(&mut tx, order, status)
            .await?;

        let updated = self.fetch_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(order_uuid = %order, %status, "updated order status");

        Ok(updated)
    }

    async fn cancel_order(
        &self,
        identity: Identity,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_owned_order(&mut tx, &identity, order).await?;

        let current = self.fetch_order(&mut tx, order).await?;

        if current.status == OrderStatus::Cancelled {
            tx.commit().await?;

            return Ok(current);
        }

        self.repository
            .set_order_status(&mut tx, order, OrderStatus::Cancelled)
            .await?;

        let cancelled = self.fetch_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(order_uuid = %order, "cancelled order");

        Ok(cancelled)
    }

    async fn delete_order(
        &self,
        identity: Identity,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_owned_order(&mut tx, &identity, order).await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(order_uuid = %order, "deleted order");

        Ok(())
    }
}

/// Order placement and management.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Prices a cart against the live catalog and persists it as a paid order.
    ///
    /// Either the whole order is written or nothing is.
    async fn place_order(
        &self,
        identity: Identity,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The caller's own orders, newest first.
    async fn list_orders_for_user(
        &self,
        identity: Identity,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first. Admin only.
    async fn list_all_orders(
        &self,
        identity: Identity,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// One order, visible to its owner and to admins.
    async fn get_order(
        &self,
        identity: Identity,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Sets the status of the targeted order. Admin only.
    async fn update_order_status(
        &self,
        identity: Identity,
        target: OrderTarget,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Marks an order cancelled. Cancelling twice is a no-op.
    async fn cancel_order(
        &self,
        identity: Identity,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Permanently removes an order and its lines.
    async fn delete_order(
        &self,
        identity: Identity,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError>;
}
