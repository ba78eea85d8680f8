//! Books Domain
//!
//! MongoDB-backed book catalog. Isolated CRUD with the shared pagination
//! envelope; mounted only when a MongoDB connection is configured.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{BookError, BookResult};
pub use models::{Book, BookFilter, CreateBook, UpdateBook};
pub use repository::{BookRepository, InMemoryBookStore, MongoBookRepository};
pub use service::BookService;
