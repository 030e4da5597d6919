//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::domain::catalog::records::{
    CategoryRecord, CategoryUuid, ProductDescription, ProductImages, ProductRecord, ProductUuid,
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const FIND_CATEGORY_BY_NAME_SQL: &str = include_str!("sql/find_category_by_name.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const RENAME_CATEGORY_SQL: &str = include_str!("sql/rename_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_BY_NAME_SQL: &str = include_str!("sql/get_product_by_name.sql");
const GET_PRODUCT_BY_UUID_SQL: &str = include_str!("sql/get_product_by_uuid.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// Product row ready for insertion, with the category already resolved.
#[derive(Debug, Clone)]
pub(crate) struct ProductInsert {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: CategoryUuid,
    pub price: i64,
    pub description: ProductDescription,
    pub images: ProductImages,
}

/// Column changes for a product; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<CategoryUuid>,
    pub price: Option<i64>,
    pub description: Option<ProductDescription>,
    pub images: Option<ProductImages>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_category_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Option<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(FIND_CATEGORY_BY_NAME_SQL)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CategoryUuid,
        name: &str,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(uuid.into_uuid())
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn rename_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        new_name: &str,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(RENAME_CATEGORY_SQL)
            .bind(name)
            .bind(new_name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_CATEGORY_SQL)
            .bind(name)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_BY_NAME_SQL)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_by_uuid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_BY_UUID_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductInsert,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.category.into_uuid())
            .bind(product.price)
            .bind(Json(product.description))
            .bind(Json(product.images))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        changes: ProductChanges,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(name)
            .bind(changes.name)
            .bind(changes.category.map(CategoryUuid::into_uuid))
            .bind(changes.price)
            .bind(changes.description.map(Json))
            .bind(changes.images.map(Json))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_PRODUCT_SQL)
            .bind(name)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price: i64 = row.try_get("price")?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            category_name: row.try_get("category_name")?,
            price: price.try_into().map_err(|error| sqlx::Error::ColumnDecode {
                index: "price".to_string(),
                source: Box::new(error),
            })?,
            description: row
                .try_get::<Json<ProductDescription>, _>("description")?
                .0,
            images: row.try_get::<Json<ProductImages>, _>("images")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
