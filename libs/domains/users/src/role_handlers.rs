use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateRole, Role, UpdateRole};
use crate::repository::RoleRepository;
use crate::service::RoleService;

const TAG: &str = "roles";

#[derive(OpenApi)]
#[openapi(
    paths(list_roles, create_role, get_role, update_role, delete_role),
    components(schemas(Role, CreateRole, UpdateRole, ErrorResponse)),
    tags(
        (name = TAG, description = "Role administration endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<R: RoleRepository + 'static>(service: RoleService<R>) -> Router {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route(
            "/{id}",
            get(get_role).put(update_role).delete(delete_role),
        )
        .with_state(Arc::new(service))
}

/// List all roles
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All roles", body = Vec<Role>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn list_roles<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
) -> UserResult<Json<Vec<Role>>> {
    let roles = service.list().await?;
    Ok(Json(roles))
}

/// Create a role
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateRole,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Validation failed or role name already exists", body = ErrorResponse)
    )
)]
async fn create_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    ValidatedJson(create): ValidatedJson<CreateRole>,
) -> UserResult<impl IntoResponse> {
    let role = service.create(create).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Get a role by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role found", body = Role),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
async fn get_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<Role>> {
    let role = service.get(id).await?;
    Ok(Json(role))
}

/// Update a role
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Role ID")),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = Role),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
async fn update_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(update): ValidatedJson<UpdateRole>,
) -> UserResult<Json<Role>> {
    let role = service.update(id, update).await?;
    Ok(Json(role))
}

/// Delete a role
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Role not found", body = ErrorResponse)
    )
)]
async fn delete_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
