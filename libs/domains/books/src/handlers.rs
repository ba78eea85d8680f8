use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::{ErrorResponse, Page, ValidatedJson, ValidatedQuery};
use utoipa::OpenApi;

use crate::error::BookResult;
use crate::models::{Book, BookFilter, CreateBook, UpdateBook};
use crate::repository::BookRepository;
use crate::service::BookService;

const TAG: &str = "books";

#[derive(OpenApi)]
#[openapi(
    paths(list_books, create_book, get_book, update_book, delete_book),
    components(schemas(Book, CreateBook, UpdateBook, ErrorResponse)),
    tags(
        (name = TAG, description = "Book catalog endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<R: BookRepository + 'static>(service: BookService<R>) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(Arc::new(service))
}

/// List books
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Paginated books", body = Page<Book>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn list_books<R: BookRepository>(
    State(service): State<Arc<BookService<R>>>,
    ValidatedQuery(filter): ValidatedQuery<BookFilter>,
) -> BookResult<Json<Page<Book>>> {
    let (books, total) = service.list(&filter).await?;
    Ok(Json(Page::new(books, total, filter.skip, filter.limit)))
}

/// Create a book
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn create_book<R: BookRepository>(
    State(service): State<Arc<BookService<R>>>,
    ValidatedJson(create): ValidatedJson<CreateBook>,
) -> BookResult<impl IntoResponse> {
    let book = service.create(create).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "Book ObjectId in hex")),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
async fn get_book<R: BookRepository>(
    State(service): State<Arc<BookService<R>>>,
    Path(id): Path<String>,
) -> BookResult<Json<Book>> {
    let book = service.get(&id).await?;
    Ok(Json(book))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "Book ObjectId in hex")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
async fn update_book<R: BookRepository>(
    State(service): State<Arc<BookService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<UpdateBook>,
) -> BookResult<Json<Book>> {
    let book = service.update(&id, update).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "Book ObjectId in hex")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
async fn delete_book<R: BookRepository>(
    State(service): State<Arc<BookService<R>>>,
    Path(id): Path<String>,
) -> BookResult<impl IntoResponse> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
