use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::models::Product;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub stock: i32,
    pub low_stock_threshold: i32,
    pub created_by: Uuid,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "domain_users::entity::user::Entity",
        from = "Column::CreatedBy",
        to = "domain_users::entity::user::Column::Id"
    )]
    Creator,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<domain_users::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            image_url: model.image_url,
            is_active: model.is_active,
            price: model.price,
            stock: model.stock,
            low_stock_threshold: model.low_stock_threshold,
            created_by: model.created_by,
            category_id: model.category_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        use sea_orm::ActiveValue::Set;
        Self {
            id: Set(product.id),
            name: Set(product.name),
            description: Set(product.description),
            image_url: Set(product.image_url),
            is_active: Set(product.is_active),
            price: Set(product.price),
            stock: Set(product.stock),
            low_stock_threshold: Set(product.low_stock_threshold),
            created_by: Set(product.created_by),
            category_id: Set(product.category_id),
            created_at: Set(product.created_at),
            updated_at: Set(product.updated_at),
        }
    }
}
