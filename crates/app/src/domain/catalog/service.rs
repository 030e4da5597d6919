//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewCategory, NewProduct, ProductUpdate, TargetedProductUpdate},
        errors::CatalogServiceError,
        records::{
            CategoryRecord, CategoryUuid, MAX_PRODUCT_IMAGES, ProductImages, ProductRecord,
            ProductUuid,
        },
        repository::{PgCatalogRepository, ProductChanges, ProductInsert},
    },
};

/// PostgreSQL-backed [`CatalogService`].
#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    /// Service over `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }

    async fn resolve_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<CategoryUuid, CatalogServiceError> {
        self.repository
            .find_category_by_name(tx, name)
            .await?
            .map(|category| category.uuid)
            .ok_or(CatalogServiceError::CategoryNotFound)
    }

    async fn apply_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        update: ProductUpdate,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let new_name = update.name.as_deref().map(required_name).transpose()?;
        let price = update.price.map(checked_price).transpose()?;

        if let Some(images) = &update.images {
            checked_images(images)?;
        }

        let category = match update.category.as_deref() {
            Some(category) => Some(self.resolve_category(tx, category.trim()).await?),
            None => None,
        };

        let updated = self
            .repository
            .update_product(
                tx,
                name,
                ProductChanges {
                    name: new_name,
                    category,
                    price,
                    description: update.description,
                    images: update.images,
                },
            )
            .await?;

        Ok(updated)
    }

    async fn remove(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<(), CatalogServiceError> {
        let rows_affected = self.repository.delete_product(tx, name).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        Ok(())
    }
}

fn required_name(name: &str) -> Result<String, CatalogServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(CatalogServiceError::MissingRequiredData);
    }

    Ok(name.to_string())
}

fn checked_price(price: u64) -> Result<i64, CatalogServiceError> {
    if price == 0 {
        return Err(CatalogServiceError::InvalidData);
    }

    Ok(i64::try_from(price)?)
}

fn checked_images(images: &ProductImages) -> Result<(), CatalogServiceError> {
    if images.len() > MAX_PRODUCT_IMAGES {
        return Err(CatalogServiceError::TooManyImages);
    }

    Ok(())
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(&self, name: &str) -> Result<CategoryRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.find_category_by_name(&mut tx, name).await?;

        tx.commit().await?;

        category.ok_or(CatalogServiceError::NotFound)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        let name = required_name(&category.name)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_category(&mut tx, CategoryUuid::new(), &name)
            .await?;

        tx.commit().await?;

        info!(category_uuid = %created.uuid, "created category");

        Ok(created)
    }

    async fn rename_category(
        &self,
        name: &str,
        new_name: &str,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        let new_name = required_name(new_name)?;

        let mut tx = self.db.begin().await?;

        let renamed = self
            .repository
            .rename_category(&mut tx, name, &new_name)
            .await?;

        tx.commit().await?;

        Ok(renamed)
    }

    async fn delete_category(&self, name: &str) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_category(&mut tx, name).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, name: &str) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product_by_name(&mut tx, name).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_product_by_uuid(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product_by_uuid(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        if products.is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let mut categories: FxHashMap<String, CategoryUuid> = FxHashMap::default();
        let mut created = Vec::with_capacity(products.len());

        for product in products {
            let name = required_name(&product.name)?;
            let category_name = required_name(&product.category)?;
            let price = checked_price(product.price)?;

            checked_images(&product.images)?;

            let category = match categories.get(&category_name) {
                Some(category) => *category,
                None => {
                    let category = self.resolve_category(&mut tx, &category_name).await?;

                    categories.insert(category_name, category);

                    category
                }
            };

            created.push(
                self.repository
                    .create_product(
                        &mut tx,
                        ProductInsert {
                            uuid: ProductUuid::new(),
                            name,
                            category,
                            price,
                            description: product.description,
                            images: product.images,
                        },
                    )
                    .await?,
            );
        }

        tx.commit().await?;

        info!(count = created.len(), "created products");

        Ok(created)
    }

    async fn update_product(
        &self,
        name: &str,
        update: ProductUpdate,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.apply_update(&mut tx, name, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn update_products(
        &self,
        updates: Vec<TargetedProductUpdate>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        if updates.is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;
        let mut updated = Vec::with_capacity(updates.len());

        for TargetedProductUpdate { target, update } in updates {
            updated.push(self.apply_update(&mut tx, target.trim(), update).await?);
        }

        tx.commit().await?;

        info!(count = updated.len(), "updated products");

        Ok(updated)
    }

    async fn delete_product(&self, name: &str) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        self.remove(&mut tx, name).await?;

        tx.commit().await?;

        info!(product = name, "deleted product");

        Ok(())
    }

    async fn delete_products(&self, names: Vec<String>) -> Result<(), CatalogServiceError> {
        if names.is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        for name in &names {
            self.remove(&mut tx, name.trim()).await?;
        }

        tx.commit().await?;

        info!(count = names.len(), "deleted products");

        Ok(())
    }
}

/// Categories and products.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// All live categories, sorted by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError>;

    /// Retrieve a single live category by name.
    async fn get_category(&self, name: &str) -> Result<CategoryRecord, CatalogServiceError>;

    /// Creates a category. Names are unique among live categories.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Renames the live category called `name`.
    async fn rename_category(
        &self,
        name: &str,
        new_name: &str,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Soft-deletes a category. Products keep pointing at it.
    async fn delete_category(&self, name: &str) -> Result<(), CatalogServiceError>;

    /// All live products, newest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Retrieve a single live product by name.
    async fn get_product(&self, name: &str) -> Result<ProductRecord, CatalogServiceError>;

    /// Retrieve a single live product by UUID.
    async fn get_product_by_uuid(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Creates every product or none of them.
    async fn create_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Applies a partial update to the live product called `name`.
    async fn update_product(
        &self,
        name: &str,
        update: ProductUpdate,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Applies every update or none of them. Updates run in order, so a later
    /// entry may target a name an earlier one introduced.
    async fn update_products(
        &self,
        updates: Vec<TargetedProductUpdate>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Soft-deletes a product and clears its images.
    async fn delete_product(&self, name: &str) -> Result<(), CatalogServiceError>;

    /// Soft-deletes every named product, or none if any is missing.
    async fn delete_products(&self, names: Vec<String>) -> Result<(), CatalogServiceError>;
}
