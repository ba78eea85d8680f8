use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateCategory, CreateProduct, Product, ProductFilter, ProductResponse,
    UpdateCategory, UpdateProduct,
};
use crate::repository::{CategoryRepository, ProductRepository};

pub struct ProductService<P, C> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: Arc<P>, categories: Arc<C>) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn list(
        &self,
        filter: &ProductFilter,
    ) -> CatalogResult<(Vec<ProductResponse>, u64)> {
        let (details, total) = self.products.list(filter).await?;
        Ok((details.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<ProductResponse> {
        let detail = self
            .products
            .get(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;
        Ok(detail.into())
    }

    #[instrument(skip(self, create), fields(name = %create.name))]
    pub async fn create(
        &self,
        creator_id: Uuid,
        create: CreateProduct,
    ) -> CatalogResult<ProductResponse> {
        if !self.categories.exists(create.category_id).await? {
            return Err(CatalogError::CategoryNotFound(create.category_id));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: create.name,
            description: create.description,
            image_url: create.image_url,
            is_active: true,
            price: create.price,
            stock: create.stock,
            low_stock_threshold: create.low_stock_threshold,
            created_by: creator_id,
            category_id: create.category_id,
            created_at: now,
            updated_at: now,
        };
        let detail = self.products.create(product).await?;
        info!(product_id = %detail.product.id, "product created");
        Ok(detail.into())
    }

    /// Mutates only the supplied fields, then returns the re-read record.
    pub async fn update(&self, id: Uuid, update: UpdateProduct) -> CatalogResult<ProductResponse> {
        let detail = self
            .products
            .get(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if let Some(category_id) = update.category_id {
            if !self.categories.exists(category_id).await? {
                return Err(CatalogError::CategoryNotFound(category_id));
            }
        }

        let mut product = detail.product;
        product.apply_update(update);
        let detail = self.products.update(product).await?;
        Ok(detail.into())
    }

    pub async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        if !self.products.delete(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }
        info!(product_id = %id, "product deleted");
        Ok(())
    }
}

/// Category CRUD. Mutations are restricted to the creator; reads and
/// creation are open to any authenticated identity.
pub struct CategoryService<C> {
    categories: Arc<C>,
}

impl<C: CategoryRepository> CategoryService<C> {
    pub fn new(categories: Arc<C>) -> Self {
        Self { categories }
    }

    pub async fn list(&self) -> CatalogResult<Vec<Category>> {
        self.categories.list().await
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Category> {
        self.categories
            .get(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    pub async fn create(&self, creator_id: Uuid, create: CreateCategory) -> CatalogResult<Category> {
        let now = Utc::now();
        self.categories
            .create(Category {
                id: Uuid::new_v4(),
                name: create.name,
                description: create.description,
                created_by: creator_id,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    pub async fn update(
        &self,
        actor_id: Uuid,
        id: Uuid,
        update: UpdateCategory,
    ) -> CatalogResult<Category> {
        let mut category = self.get(id).await?;
        if category.created_by != actor_id {
            return Err(CatalogError::NotCategoryOwner);
        }
        category.apply_update(update);
        self.categories.update(category).await
    }

    pub async fn delete(&self, actor_id: Uuid, id: Uuid) -> CatalogResult<()> {
        let category = self.get(id).await?;
        if category.created_by != actor_id {
            return Err(CatalogError::NotCategoryOwner);
        }
        if !self.categories.delete(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }
        Ok(())
    }
}
