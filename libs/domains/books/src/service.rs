use std::sync::Arc;

use tracing::info;

use crate::error::{BookError, BookResult};
use crate::models::{Book, BookFilter, CreateBook, UpdateBook};
use crate::repository::BookRepository;

pub struct BookService<R> {
    books: Arc<R>,
}

impl<R: BookRepository> BookService<R> {
    pub fn new(books: Arc<R>) -> Self {
        Self { books }
    }

    pub async fn list(&self, filter: &BookFilter) -> BookResult<(Vec<Book>, u64)> {
        self.books.list(filter).await
    }

    pub async fn get(&self, id: &str) -> BookResult<Book> {
        self.books
            .get(id)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    pub async fn create(&self, create: CreateBook) -> BookResult<Book> {
        let book = self.books.create(create).await?;
        info!(book_id = %book.id, "book created");
        Ok(book)
    }

    pub async fn update(&self, id: &str, update: UpdateBook) -> BookResult<Book> {
        if update.is_empty() {
            // Nothing to set; answer with the current state.
            return self.get(id).await;
        }
        self.books
            .update(id, update)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    pub async fn delete(&self, id: &str) -> BookResult<()> {
        if !self.books.delete(id).await? {
            return Err(BookError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryBookStore;

    fn service() -> BookService<InMemoryBookStore> {
        BookService::new(Arc::new(InMemoryBookStore::new()))
    }

    #[tokio::test]
    async fn get_missing_book_is_not_found() {
        let service = service();
        let id = mongodb::bson::oid::ObjectId::new().to_hex();
        let err = service.get(&id).await.unwrap_err();
        assert!(matches!(err, BookError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_update_returns_current_state() {
        let service = service();
        let book = service
            .create(CreateBook {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                description: None,
                price: 12.5,
                pages: None,
                language: None,
            })
            .await
            .unwrap();

        let unchanged = service
            .update(&book.id, UpdateBook::default())
            .await
            .unwrap();
        assert_eq!(unchanged.title, "Dune");
        assert_eq!(unchanged.price, 12.5);
    }
}
