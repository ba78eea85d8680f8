use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use axum_helpers::{ErrorResponse, Identity, Page, UuidPath, ValidatedJson, ValidatedQuery};
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{CreateProduct, ProductFilter, ProductResponse, UpdateProduct};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::ProductService;
use crate::stock::StockStatus;

const TAG: &str = "products";

#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product, update_product, delete_product),
    components(schemas(
        ProductResponse,
        CreateProduct,
        UpdateProduct,
        StockStatus,
        ErrorResponse
    )),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(Arc::new(service))
}

/// List products with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Paginated products, each annotated with stock_status", body = Page<ProductResponse>),
        (status = 400, description = "Out-of-range pagination or price parameters", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    ValidatedQuery(filter): ValidatedQuery<ProductFilter>,
) -> CatalogResult<Json<Page<ProductResponse>>> {
    let (items, total) = service.list(&filter).await?;
    Ok(Json(Page::new(items, total, filter.skip, filter.limit)))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failed or duplicate name", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(create): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create(identity.user_id, create).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ProductResponse>> {
    let product = service.get(id).await?;
    Ok(Json(product))
}

/// Update a product. Any authenticated user may update any product.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 404, description = "Product or category not found", body = ErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(update): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<ProductResponse>> {
    let product = service.update(id, update).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
