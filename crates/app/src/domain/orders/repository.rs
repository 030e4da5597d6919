//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use uuid::Uuid;

use crate::domain::{
    catalog::records::{ProductImages, ProductUuid},
    orders::records::{OrderCustomer, OrderLineRecord, OrderRecord, OrderStatus, OrderUuid},
    users::records::UserUuid,
};

const LOCK_PRODUCTS_BY_NAME_SQL: &str = include_str!("sql/lock_products_by_name.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINES_SQL: &str = include_str!("sql/create_order_lines.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_FOR_USER_SQL: &str = include_str!("sql/list_orders_for_user.sql");
const LIST_ALL_ORDERS_SQL: &str = include_str!("sql/list_all_orders.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("sql/list_order_lines.sql");
const LOCK_ORDER_OWNER_SQL: &str = include_str!("sql/lock_order_owner.sql");
const PRODUCT_IS_LIVE_SQL: &str = include_str!("sql/product_is_live.sql");
const LOCK_OLDEST_ORDER_WITH_PRODUCT_SQL: &str =
    include_str!("sql/lock_oldest_order_with_product.sql");
const SET_ORDER_STATUS_SQL: &str = include_str!("sql/set_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");

/// A live product row held with `FOR SHARE` until the transaction ends.
#[derive(Debug, Clone)]
pub(crate) struct LockedProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
}

/// Order row payload. Amounts are already validated to fit `BIGINT`.
#[derive(Debug, Clone)]
pub(crate) struct OrderInsert {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub location: String,
    pub subtotal: i64,
    pub delivery_fee: i64,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub paid: bool,
}

/// Column-wise order lines, bound as arrays and expanded with `UNNEST`.
#[derive(Debug, Clone, Default)]
pub(crate) struct OrderLinesInsert {
    pub positions: Vec<i32>,
    pub products: Vec<Uuid>,
    pub quantities: Vec<i32>,
    pub unit_prices: Vec<i64>,
}

/// Order columns without lines.
#[derive(Debug, Clone)]
struct OrderHeader {
    uuid: OrderUuid,
    customer: OrderCustomer,
    location: String,
    subtotal: u64,
    delivery_fee: u64,
    total_amount: u64,
    status: OrderStatus,
    paid: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl OrderHeader {
    fn with_lines(self, lines: Vec<OrderLineRecord>) -> OrderRecord {
        OrderRecord {
            uuid: self.uuid,
            customer: self.customer,
            lines,
            location: self.location,
            subtotal: self.subtotal,
            delivery_fee: self.delivery_fee,
            total_amount: self.total_amount,
            status: self.status,
            paid: self.paid,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Line row tagged with the order it belongs to.
#[derive(Debug, Clone)]
struct OrderLineRow {
    order_uuid: OrderUuid,
    line: OrderLineRecord,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn lock_products_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        names: &[String],
    ) -> Result<Vec<LockedProduct>, sqlx::Error> {
        query_as::<Postgres, LockedProduct>(LOCK_PRODUCTS_BY_NAME_SQL)
            .bind(names)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderInsert,
        lines: OrderLinesInsert,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user.into_uuid())
            .bind(order.location)
            .bind(order.subtotal)
            .bind(order.delivery_fee)
            .bind(order.total_amount)
            .bind(order.status.as_str())
            .bind(order.paid)
            .execute(&mut **tx)
            .await?;

        query(CREATE_ORDER_LINES_SQL)
            .bind(order.uuid.into_uuid())
            .bind(lines.positions)
            .bind(lines.products)
            .bind(lines.quantities)
            .bind(lines.unit_prices)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let Some(header) = query_as::<Postgres, OrderHeader>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        Ok(self
            .attach_lines(tx, vec![header])
            .await?
            .into_iter()
            .next())
    }

    pub(crate) async fn list_orders_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let headers = query_as::<Postgres, OrderHeader>(LIST_ORDERS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.attach_lines(tx, headers).await
    }

    pub(crate) async fn list_all_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let headers = query_as::<Postgres, OrderHeader>(LIST_ALL_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        self.attach_lines(tx, headers).await
    }

    pub(crate) async fn lock_order_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        let owner: Option<Uuid> = query_scalar(LOCK_ORDER_OWNER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(owner.map(UserUuid::from_uuid))
    }

    pub(crate) async fn product_is_live(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(PRODUCT_IS_LIVE_SQL)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_oldest_order_with_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_name: &str,
    ) -> Result<Option<OrderUuid>, sqlx::Error> {
        let order: Option<Uuid> = query_scalar(LOCK_OLDEST_ORDER_WITH_PRODUCT_SQL)
            .bind(product_name)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(order.map(OrderUuid::from_uuid))
    }

    pub(crate) async fn set_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = query(SET_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn attach_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        headers: Vec<OrderHeader>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = headers.iter().map(|header| header.uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, OrderLineRow>(LIST_ORDER_LINES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut lines: FxHashMap<OrderUuid, Vec<OrderLineRecord>> = FxHashMap::default();

        for row in rows {
            lines.entry(row.order_uuid).or_default().push(row.line);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let order_lines = lines.remove(&header.uuid).unwrap_or_default();

                header.with_lines(order_lines)
            })
            .collect())
    }
}

fn decode_u64(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

fn decode_u32(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

impl<'r> FromRow<'r, PgRow> for LockedProduct {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: decode_u64(row, "price")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderHeader {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer: OrderCustomer {
                uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
                name: row.try_get("user_name")?,
                email: row.try_get("user_email")?,
            },
            location: row.try_get("location")?,
            subtotal: decode_u64(row, "subtotal")?,
            delivery_fee: decode_u64(row, "delivery_fee")?,
            total_amount: decode_u64(row, "total_amount")?,
            status: status
                .parse::<OrderStatus>()
                .map_err(|error| sqlx::Error::ColumnDecode {
                    index: "status".to_string(),
                    source: Box::new(error),
                })?,
            paid: row.try_get("paid")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            line: OrderLineRecord {
                position: decode_u32(row, "position")?,
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                product_name: row.try_get("product_name")?,
                product_price: decode_u64(row, "product_price")?,
                product_images: row.try_get::<Json<ProductImages>, _>("product_images")?.0,
                quantity: decode_u32(row, "quantity")?,
                unit_price: decode_u64(row, "unit_price")?,
            },
        })
    }
}
