use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("Invalid book id: {0}")]
    InvalidId(String),

    #[error("Book with id {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

pub type BookResult<T> = Result<T, BookError>;

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::InvalidId(_) => AppError::BadRequest(err.to_string()),
            BookError::NotFound(_) => AppError::NotFound(err.to_string()),
            BookError::Mongo(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
