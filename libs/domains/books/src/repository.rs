use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, DateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tokio::sync::RwLock;

use crate::error::{BookError, BookResult};
use crate::models::{Book, BookDocument, BookFilter, CreateBook, UpdateBook};

const COLLECTION: &str = "books";

fn parse_id(id: &str) -> BookResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| BookError::InvalidId(id.to_string()))
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn list(&self, filter: &BookFilter) -> BookResult<(Vec<Book>, u64)>;
    async fn get(&self, id: &str) -> BookResult<Option<Book>>;
    async fn create(&self, create: CreateBook) -> BookResult<Book>;
    async fn update(&self, id: &str, update: UpdateBook) -> BookResult<Option<Book>>;
    async fn delete(&self, id: &str) -> BookResult<bool>;
}

pub struct MongoBookRepository {
    collection: Collection<BookDocument>,
}

impl MongoBookRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }
}

fn update_document(update: UpdateBook) -> Document {
    let mut set = Document::new();
    if let Some(title) = update.title {
        set.insert("title", title);
    }
    if let Some(author) = update.author {
        set.insert("author", author);
    }
    if let Some(description) = update.description {
        set.insert("description", description);
    }
    if let Some(price) = update.price {
        set.insert("price", price);
    }
    if let Some(pages) = update.pages {
        set.insert("pages", pages);
    }
    if let Some(language) = update.language {
        set.insert("language", language);
    }
    set.insert("updated_at", Bson::DateTime(DateTime::now()));
    set
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn list(&self, filter: &BookFilter) -> BookResult<(Vec<Book>, u64)> {
        let total = self.collection.count_documents(doc! {}).await?;
        let documents: Vec<BookDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .skip(filter.skip)
            .limit(filter.limit as i64)
            .await?
            .try_collect()
            .await?;
        Ok((documents.into_iter().map(Into::into).collect(), total))
    }

    async fn get(&self, id: &str) -> BookResult<Option<Book>> {
        let oid = parse_id(id)?;
        let document = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(document.map(Into::into))
    }

    async fn create(&self, create: CreateBook) -> BookResult<Book> {
        let now = DateTime::now();
        let mut document = BookDocument {
            id: None,
            title: create.title,
            author: create.author,
            description: create.description,
            price: create.price,
            pages: create.pages,
            language: create.language,
            created_at: now,
            updated_at: now,
        };
        let result = self.collection.insert_one(&document).await?;
        document.id = result.inserted_id.as_object_id();
        Ok(document.into())
    }

    async fn update(&self, id: &str, update: UpdateBook) -> BookResult<Option<Book>> {
        let oid = parse_id(id)?;
        let document = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": update_document(update) })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(document.map(Into::into))
    }

    async fn delete(&self, id: &str) -> BookResult<bool> {
        let oid = parse_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }
}

/// In-memory store mirroring the Mongo semantics, ObjectId hex ids
/// included.
#[derive(Default)]
pub struct InMemoryBookStore {
    books: Arc<RwLock<HashMap<ObjectId, BookDocument>>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookStore {
    async fn list(&self, filter: &BookFilter) -> BookResult<(Vec<Book>, u64)> {
        let books = self.books.read().await;
        let mut documents: Vec<BookDocument> = books.values().cloned().collect();
        documents.sort_by_key(|d| d.id);

        let total = documents.len() as u64;
        let page = documents
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit as usize)
            .map(Into::into)
            .collect();
        Ok((page, total))
    }

    async fn get(&self, id: &str) -> BookResult<Option<Book>> {
        let oid = parse_id(id)?;
        Ok(self.books.read().await.get(&oid).cloned().map(Into::into))
    }

    async fn create(&self, create: CreateBook) -> BookResult<Book> {
        let now = DateTime::now();
        let oid = ObjectId::new();
        let document = BookDocument {
            id: Some(oid),
            title: create.title,
            author: create.author,
            description: create.description,
            price: create.price,
            pages: create.pages,
            language: create.language,
            created_at: now,
            updated_at: now,
        };
        self.books.write().await.insert(oid, document.clone());
        Ok(document.into())
    }

    async fn update(&self, id: &str, update: UpdateBook) -> BookResult<Option<Book>> {
        let oid = parse_id(id)?;
        let mut books = self.books.write().await;
        let Some(document) = books.get_mut(&oid) else {
            return Ok(None);
        };
        if let Some(title) = update.title {
            document.title = title;
        }
        if let Some(author) = update.author {
            document.author = author;
        }
        if let Some(description) = update.description {
            document.description = Some(description);
        }
        if let Some(price) = update.price {
            document.price = price;
        }
        if let Some(pages) = update.pages {
            document.pages = Some(pages);
        }
        if let Some(language) = update.language {
            document.language = Some(language);
        }
        document.updated_at = DateTime::now();
        Ok(Some(document.clone().into()))
    }

    async fn delete(&self, id: &str) -> BookResult<bool> {
        let oid = parse_id(id)?;
        Ok(self.books.write().await.remove(&oid).is_some())
    }
}
