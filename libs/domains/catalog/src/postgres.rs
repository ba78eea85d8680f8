use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use domain_users::entity::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use crate::entity::{category, product};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CategorySummary, CreatorSummary, Product, ProductDetail, ProductFilter,
};
use crate::query::{filter_condition, sort_key, status_rank_expr, SortKey};
use crate::repository::{CategoryRepository, ProductRepository};

pub struct PgCatalogRepository {
    db: DatabaseConnection,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// One query per relation per page, keyed joins resolved in memory.
    async fn load_details(
        &self,
        models: Vec<product::Model>,
    ) -> CatalogResult<Vec<ProductDetail>> {
        let category_ids: HashSet<Uuid> = models.iter().map(|m| m.category_id).collect();
        let creator_ids: HashSet<Uuid> = models.iter().map(|m| m.created_by).collect();

        let categories: HashMap<Uuid, CategorySummary> = category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| {
                (
                    c.id,
                    CategorySummary {
                        id: c.id,
                        name: c.name,
                    },
                )
            })
            .collect();

        let creators: HashMap<Uuid, CreatorSummary> = user::Entity::find()
            .filter(user::Column::Id.is_in(creator_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    CreatorSummary {
                        id: u.id,
                        username: u.username,
                    },
                )
            })
            .collect();

        Ok(models
            .into_iter()
            .map(|model| {
                let category = categories.get(&model.category_id).cloned();
                let creator = creators.get(&model.created_by).cloned();
                ProductDetail {
                    product: model.into(),
                    category,
                    creator,
                }
            })
            .collect())
    }

    async fn load_detail(&self, model: product::Model) -> CatalogResult<ProductDetail> {
        let mut details = self.load_details(vec![model]).await?;
        Ok(details.remove(0))
    }
}

fn map_product_unique(name: &str, err: sea_orm::DbErr) -> CatalogError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        CatalogError::DuplicateProductName(name.to_string())
    } else {
        CatalogError::Database(err)
    }
}

#[async_trait]
impl ProductRepository for PgCatalogRepository {
    async fn create(&self, new_product: Product) -> CatalogResult<ProductDetail> {
        let name = new_product.name.clone();
        let active: product::ActiveModel = new_product.into();
        let model = active
            .insert(&self.db)
            .await
            .map_err(|err| map_product_unique(&name, err))?;
        self.load_detail(model).await
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<ProductDetail>> {
        match product::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.load_detail(model).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &ProductFilter) -> CatalogResult<(Vec<ProductDetail>, u64)> {
        // The same condition feeds count and fetch.
        let condition = filter_condition(filter);

        let total = product::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        let mut select = product::Entity::find().filter(condition);
        if let Some(key) = filter.sort_by.as_deref().and_then(sort_key) {
            let direction = if filter.descending() {
                Order::Desc
            } else {
                Order::Asc
            };
            select = match key {
                SortKey::Column(column) => select.order_by(column, direction),
                SortKey::Status => select.order_by(status_rank_expr(), direction),
            };
        }

        let models = select
            .offset(filter.skip)
            .limit(filter.limit)
            .all(&self.db)
            .await?;
        let details = self.load_details(models).await?;
        Ok((details, total))
    }

    async fn update(&self, updated: Product) -> CatalogResult<ProductDetail> {
        let id = updated.id;
        let name = updated.name.clone();
        let active: product::ActiveModel = updated.into();
        active
            .update(&self.db)
            .await
            .map_err(|err| map_product_unique(&name, err))?;

        // Re-read with relations; the record vanishing here is fatal for
        // the request, not a silent partial success.
        match product::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => self.load_detail(model).await,
            None => Err(CatalogError::ReloadFailed(id)),
        }
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl CategoryRepository for PgCatalogRepository {
    async fn create(&self, new_category: Category) -> CatalogResult<Category> {
        let name = new_category.name.clone();
        let active: category::ActiveModel = new_category.into();
        let model = active.insert(&self.db).await.map_err(|err| {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                CatalogError::DuplicateCategoryName(name)
            } else {
                CatalogError::Database(err)
            }
        })?;
        Ok(model.into())
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let model = category::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn exists(&self, id: Uuid) -> CatalogResult<bool> {
        let count = category::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, updated: Category) -> CatalogResult<Category> {
        let name = updated.name.clone();
        let active: category::ActiveModel = updated.into();
        let model = active.update(&self.db).await.map_err(|err| {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                CatalogError::DuplicateCategoryName(name)
            } else {
                CatalogError::Database(err)
            }
        })?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
