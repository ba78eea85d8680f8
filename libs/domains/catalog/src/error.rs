use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product with id {0} not found")]
    ProductNotFound(Uuid),

    #[error("Category with id {0} not found")]
    CategoryNotFound(Uuid),

    #[error("Product with name '{0}' already exists")]
    DuplicateProductName(String),

    #[error("Category with name '{0}' already exists")]
    DuplicateCategoryName(String),

    #[error("Not authorized to modify this category")]
    NotCategoryOwner,

    #[error("Product {0} disappeared during update")]
    ReloadFailed(Uuid),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(_) | CatalogError::CategoryNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            CatalogError::DuplicateProductName(_) | CatalogError::DuplicateCategoryName(_) => {
                AppError::Conflict(err.to_string())
            }
            CatalogError::NotCategoryOwner => AppError::Forbidden(err.to_string()),
            CatalogError::ReloadFailed(_) => AppError::InternalServerError(err.to_string()),
            CatalogError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
