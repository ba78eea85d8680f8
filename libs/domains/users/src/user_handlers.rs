use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::{ErrorResponse, Page, UuidPath, ValidatedJson, ValidatedQuery};
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{UpdateUser, UserFilter, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

#[derive(OpenApi)]
#[openapi(
    paths(list_users, get_user, update_user, delete_user),
    components(schemas(UserResponse, UpdateUser, ErrorResponse)),
    tags(
        (name = TAG, description = "User administration endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<U: UserRepository + 'static>(service: UserService<U>) -> Router {
    Router::new()
        .route("/", get(list_users))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(Arc::new(service))
}

/// List users with optional search
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Paginated users", body = Page<UserResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn list_users<U: UserRepository>(
    State(service): State<Arc<UserService<U>>>,
    ValidatedQuery(filter): ValidatedQuery<UserFilter>,
) -> UserResult<Json<Page<UserResponse>>> {
    let (users, total) = service.list(&filter).await?;
    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(Page::new(users, total, filter.skip, filter.limit)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user<U: UserRepository>(
    State(service): State<Arc<UserService<U>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get(id).await?;
    Ok(Json(user.into()))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn update_user<U: UserRepository>(
    State(service): State<Arc<UserService<U>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(update): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update(id, update).await?;
    Ok(Json(user.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn delete_user<U: UserRepository>(
    State(service): State<Arc<UserService<U>>>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
