use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::stock::StockStatus;

fn default_limit() -> u64 {
    10
}

fn default_threshold() -> i32 {
    10
}

fn default_price() -> Decimal {
    Decimal::ZERO
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("price_negative"));
    }
    Ok(())
}

fn non_negative_price_opt(price: &Decimal) -> Result<(), ValidationError> {
    non_negative_price(price)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

impl Category {
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub price: Decimal,
    pub stock: i32,
    pub low_stock_threshold: i32,
    pub created_by: Uuid,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::derive(self.stock, self.low_stock_threshold)
    }

    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(low_stock_threshold) = update.low_stock_threshold {
            self.low_stock_threshold = low_stock_threshold;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default = "default_price")]
    #[validate(custom(function = non_negative_price))]
    pub price: Decimal,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[serde(default = "default_threshold")]
    #[validate(range(min = 0))]
    pub low_stock_threshold: i32,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    #[validate(custom(function = non_negative_price_opt))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[validate(range(min = 0))]
    pub low_stock_threshold: Option<i32>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductFilter {
    /// Case-insensitive substring match on name.
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    /// One of red, yellow, green. Anything else applies no filter.
    pub stock_status: Option<String>,
    #[validate(custom(function = non_negative_price_opt))]
    pub min_price: Option<Decimal>,
    #[validate(custom(function = non_negative_price_opt))]
    pub max_price: Option<Decimal>,
    /// One of name, stock, price, created_at, status. Anything else keeps
    /// the store's natural order.
    pub sort_by: Option<String>,
    /// "desc" flips the direction; any other value sorts ascending.
    pub order: Option<String>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
}

impl ProductFilter {
    pub fn descending(&self) -> bool {
        self.order.as_deref() == Some("desc")
    }

    pub fn stock_bucket(&self) -> Option<StockStatus> {
        self.stock_status
            .as_deref()
            .and_then(StockStatus::parse_filter)
    }
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: None,
            category_id: None,
            stock_status: None,
            min_price: None,
            max_price: None,
            sort_by: None,
            order: None,
            skip: 0,
            limit: default_limit(),
        }
    }
}

/// Category reference embedded in product responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
}

/// Creator reference embedded in product responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatorSummary {
    pub id: Uuid,
    pub username: String,
}

/// A product together with its relational context, as loaded by the store.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: Product,
    pub category: Option<CategorySummary>,
    pub creator: Option<CreatorSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub price: Decimal,
    pub stock: i32,
    pub low_stock_threshold: i32,
    pub stock_status: StockStatus,
    pub category: Option<CategorySummary>,
    pub creator: Option<CreatorSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductDetail> for ProductResponse {
    fn from(detail: ProductDetail) -> Self {
        let status = detail.product.stock_status();
        let product = detail.product;
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            is_active: product.is_active,
            price: product.price,
            stock: product.stock,
            low_stock_threshold: product.low_stock_threshold,
            stock_status: status,
            category: detail.category,
            creator: detail.creator,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_product_defaults() {
        let create: CreateProduct = serde_json::from_value(serde_json::json!({
            "name": "Widget",
            "category_id": Uuid::new_v4(),
        }))
        .unwrap();
        assert_eq!(create.price, Decimal::ZERO);
        assert_eq!(create.stock, 0);
        assert_eq!(create.low_stock_threshold, 10);
    }

    #[test]
    fn negative_price_is_rejected() {
        let create = CreateProduct {
            name: "Widget".to_string(),
            description: None,
            image_url: None,
            price: Decimal::new(-100, 2),
            stock: 0,
            low_stock_threshold: 10,
            category_id: Uuid::new_v4(),
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn filter_limit_bounds() {
        let filter = ProductFilter {
            limit: 0,
            ..Default::default()
        };
        assert!(filter.validate().is_err());

        let filter = ProductFilter {
            limit: 101,
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn unknown_stock_bucket_means_no_filter() {
        let filter = ProductFilter {
            stock_status: Some("purple".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.stock_bucket(), None);
    }

    #[test]
    fn response_annotates_stock_status() {
        let now = Utc::now();
        let detail = ProductDetail {
            product: Product {
                id: Uuid::new_v4(),
                name: "Widget".to_string(),
                description: None,
                image_url: None,
                is_active: true,
                price: Decimal::new(999, 2),
                stock: 5,
                low_stock_threshold: 10,
                created_by: Uuid::new_v4(),
                category_id: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
            },
            category: None,
            creator: None,
        };
        let response = ProductResponse::from(detail);
        assert_eq!(response.stock_status, StockStatus::Yellow);
    }
}
