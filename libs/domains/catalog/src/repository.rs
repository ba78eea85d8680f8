use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CategorySummary, CreatorSummary, Product, ProductDetail, ProductFilter,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> CatalogResult<ProductDetail>;
    async fn get(&self, id: Uuid) -> CatalogResult<Option<ProductDetail>>;
    async fn list(&self, filter: &ProductFilter) -> CatalogResult<(Vec<ProductDetail>, u64)>;
    /// Persists the record, then re-reads it with its relations.
    async fn update(&self, product: Product) -> CatalogResult<ProductDetail>;
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> CatalogResult<Category>;
    async fn get(&self, id: Uuid) -> CatalogResult<Option<Category>>;
    async fn exists(&self, id: Uuid) -> CatalogResult<bool>;
    async fn list(&self) -> CatalogResult<Vec<Category>>;
    async fn update(&self, category: Category) -> CatalogResult<Category>;
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// In-memory store for tests and local runs. Mirrors the SQL query
/// semantics through the same [`crate::stock::StockStatus`] rule.
#[derive(Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
    usernames: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a username so creator summaries resolve.
    pub async fn insert_user(&self, id: Uuid, username: &str) {
        self.usernames
            .write()
            .await
            .insert(id, username.to_string());
    }

    async fn detail(&self, product: Product) -> ProductDetail {
        let category = self
            .categories
            .read()
            .await
            .get(&product.category_id)
            .map(|c| CategorySummary {
                id: c.id,
                name: c.name.clone(),
            });
        let creator = self
            .usernames
            .read()
            .await
            .get(&product.created_by)
            .map(|username| CreatorSummary {
                id: product.created_by,
                username: username.clone(),
            });
        ProductDetail {
            product,
            category,
            creator,
        }
    }

    fn matches(product: &Product, filter: &ProductFilter) -> bool {
        if let Some(search) = &filter.search {
            if !product
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if let Some(category_id) = filter.category_id {
            if product.category_id != category_id {
                return false;
            }
        }
        if let Some(bucket) = filter.stock_bucket() {
            if product.stock_status() != bucket {
                return false;
            }
        }
        if let Some(min_price) = filter.min_price {
            if product.price < min_price {
                return false;
            }
        }
        if let Some(max_price) = filter.max_price {
            if product.price > max_price {
                return false;
            }
        }
        true
    }

    fn sort(products: &mut [Product], filter: &ProductFilter) {
        match filter.sort_by.as_deref() {
            Some("name") => products.sort_by(|a, b| a.name.cmp(&b.name)),
            Some("stock") => products.sort_by_key(|p| p.stock),
            Some("price") => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Some("created_at") => products.sort_by_key(|p| p.created_at),
            Some("status") => products.sort_by_key(|p| p.stock_status().rank()),
            _ => return,
        }
        if filter.descending() {
            products.reverse();
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn create(&self, product: Product) -> CatalogResult<ProductDetail> {
        {
            let mut products = self.products.write().await;
            if products.values().any(|p| p.name == product.name) {
                return Err(CatalogError::DuplicateProductName(product.name));
            }
            products.insert(product.id, product.clone());
        }
        Ok(self.detail(product).await)
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<ProductDetail>> {
        let product = self.products.read().await.get(&id).cloned();
        match product {
            Some(product) => Ok(Some(self.detail(product).await)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &ProductFilter) -> CatalogResult<(Vec<ProductDetail>, u64)> {
        let mut matched: Vec<Product> = self
            .products
            .read()
            .await
            .values()
            .filter(|p| Self::matches(p, filter))
            .cloned()
            .collect();
        Self::sort(&mut matched, filter);

        let total = matched.len() as u64;
        let windowed: Vec<Product> = matched
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit as usize)
            .collect();

        let mut details = Vec::with_capacity(windowed.len());
        for product in windowed {
            details.push(self.detail(product).await);
        }
        Ok((details, total))
    }

    async fn update(&self, product: Product) -> CatalogResult<ProductDetail> {
        {
            let mut products = self.products.write().await;
            if products
                .values()
                .any(|p| p.id != product.id && p.name == product.name)
            {
                return Err(CatalogError::DuplicateProductName(product.name));
            }
            if !products.contains_key(&product.id) {
                return Err(CatalogError::ProductNotFound(product.id));
            }
            products.insert(product.id, product.clone());
        }
        Ok(self.detail(product).await)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn create(&self, category: Category) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        if categories.values().any(|c| c.name == category.name) {
            return Err(CatalogError::DuplicateCategoryName(category.name));
        }
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn get(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn exists(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.categories.read().await.contains_key(&id))
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let mut categories: Vec<Category> =
            self.categories.read().await.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn update(&self, category: Category) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        if categories
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(CatalogError::DuplicateCategoryName(category.name));
        }
        if !categories.contains_key(&category.id) {
            return Err(CatalogError::CategoryNotFound(category.id));
        }
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        Ok(self.categories.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::stock::StockStatus;

    fn product(name: &str, stock: i32, threshold: i32, price: Decimal) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            image_url: None,
            is_active: true,
            price,
            stock,
            low_stock_threshold: threshold,
            created_by: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded_store() -> InMemoryCatalog {
        let store = InMemoryCatalog::new();
        // stock=5 th=10 (yellow), stock=0 th=5 (red), stock=20 th=5 (green)
        ProductRepository::create(&store, product("alpha", 5, 10, Decimal::new(1000, 2)))
            .await
            .unwrap();
        ProductRepository::create(&store, product("beta", 0, 5, Decimal::new(2000, 2)))
            .await
            .unwrap();
        ProductRepository::create(&store, product("gamma", 20, 5, Decimal::new(3000, 2)))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn yellow_filter_matches_only_the_yellow_record() {
        let store = seeded_store().await;
        let filter = ProductFilter {
            stock_status: Some("yellow".to_string()),
            ..Default::default()
        };
        let (items, total) = ProductRepository::list(&store, &filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].product.name, "alpha");
    }

    #[tokio::test]
    async fn status_sort_groups_red_yellow_green() {
        let store = seeded_store().await;
        let filter = ProductFilter {
            sort_by: Some("status".to_string()),
            ..Default::default()
        };
        let (items, _) = ProductRepository::list(&store, &filter).await.unwrap();
        let statuses: Vec<StockStatus> =
            items.iter().map(|d| d.product.stock_status()).collect();
        assert_eq!(
            statuses,
            vec![StockStatus::Red, StockStatus::Yellow, StockStatus::Green]
        );

        let filter = ProductFilter {
            sort_by: Some("status".to_string()),
            order: Some("desc".to_string()),
            ..Default::default()
        };
        let (items, _) = ProductRepository::list(&store, &filter).await.unwrap();
        assert_eq!(items[0].product.stock_status(), StockStatus::Green);
    }

    #[tokio::test]
    async fn total_ignores_the_pagination_window() {
        let store = seeded_store().await;
        let filter = ProductFilter {
            skip: 2,
            limit: 1,
            ..Default::default()
        };
        let (items, total) = ProductRepository::list(&store, &filter).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn price_bounds_are_inclusive() {
        let store = seeded_store().await;
        let filter = ProductFilter {
            min_price: Some(Decimal::new(2000, 2)),
            max_price: Some(Decimal::new(2000, 2)),
            ..Default::default()
        };
        let (items, _) = ProductRepository::list(&store, &filter).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.name, "beta");
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let store = seeded_store().await;
        let filter = ProductFilter {
            search: Some("ALPH".to_string()),
            ..Default::default()
        };
        let (items, _) = ProductRepository::list(&store, &filter).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_product_name_is_a_conflict() {
        let store = seeded_store().await;
        let err = ProductRepository::create(&store, product("alpha", 1, 1, Decimal::ZERO))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProductName(_)));
    }
}
