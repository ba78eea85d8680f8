use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use axum_helpers::{ErrorResponse, Identity, UuidPath, ValidatedJson};
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

const TAG: &str = "categories";

#[derive(OpenApi)]
#[openapi(
    paths(list_categories, create_category, get_category, update_category, delete_category),
    components(schemas(Category, CreateCategory, UpdateCategory, ErrorResponse)),
    tags(
        (name = TAG, description = "Category endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<C: CategoryRepository + 'static>(service: CategoryService<C>) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(Arc::new(service))
}

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn list_categories<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
) -> CatalogResult<Json<Vec<Category>>> {
    let categories = service.list().await?;
    Ok(Json(categories))
}

/// Create a category owned by the caller
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation failed or duplicate name", body = ErrorResponse)
    )
)]
async fn create_category<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(create): ValidatedJson<CreateCategory>,
) -> CatalogResult<impl IntoResponse> {
    let category = service.create(identity.user_id, create).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn get_category<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Category>> {
    let category = service.get(id).await?;
    Ok(Json(category))
}

/// Update a category (creator only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn update_category<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    Extension(identity): Extension<Identity>,
    UuidPath(id): UuidPath,
    ValidatedJson(update): ValidatedJson<UpdateCategory>,
) -> CatalogResult<Json<Category>> {
    let category = service.update(identity.user_id, id, update).await?;
    Ok(Json(category))
}

/// Delete a category (creator only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn delete_category<C: CategoryRepository>(
    State(service): State<Arc<CategoryService<C>>>,
    Extension(identity): Extension<Identity>,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse> {
    service.delete(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
