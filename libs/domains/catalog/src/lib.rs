//! Catalog Domain
//!
//! Products and categories with derived stock status and a composable
//! filter/sort/pagination query builder.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (products, categories)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← CRUD orchestration, ownership rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! │   + Query   │  ← One condition builder for count and fetch
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, StockStatus
//! └─────────────┘
//! ```
//!
//! `stock_status` is never stored. [`StockStatus::derive`] is the single
//! rule behind the filter predicate, the status sort key and the response
//! annotation.

pub mod category_handlers;
pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod product_handlers;
pub mod query;
pub mod repository;
pub mod service;
pub mod stock;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use models::{
    Category, CategorySummary, CreateCategory, CreateProduct, CreatorSummary, Product,
    ProductDetail, ProductFilter, ProductResponse, UpdateCategory, UpdateProduct,
};
pub use postgres::PgCatalogRepository;
pub use repository::{CategoryRepository, InMemoryCatalog, ProductRepository};
pub use service::{CategoryService, ProductService};
pub use stock::{StockStatus, DEFAULT_LOW_STOCK_THRESHOLD};
