use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Form, Json, Router};
use axum_helpers::{Claims, ErrorResponse, Identity, ValidatedJson};
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::middleware::require_auth;
use crate::models::{
    LoginRequest, LogoutResponse, RegisterRequest, RegisterResponse, TokenResponse, UserResponse,
};
use crate::repository::{RoleRepository, UserRepository};
use crate::service::AuthService;

const TAG: &str = "auth";

#[derive(OpenApi)]
#[openapi(
    paths(register, login, me, logout),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        TokenResponse,
        LogoutResponse,
        UserResponse,
        ErrorResponse
    )),
    tags(
        (name = TAG, description = "Registration, login and session endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<U, R>(auth: Arc<AuthService<U, R>>) -> Router
where
    U: UserRepository + 'static,
    R: RoleRepository + 'static,
{
    let protected = Router::new()
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route_layer(axum::middleware::from_fn_with_state(
            auth.clone(),
            require_auth::<U, R>,
        ));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
        .with_state(auth)
}

/// Register a new account and sign it in
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation failed or email/username already in use", body = ErrorResponse)
    )
)]
async fn register<U: UserRepository, R: RoleRepository>(
    State(auth): State<Arc<AuthService<U, R>>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let response = auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange form credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Inactive user", body = ErrorResponse),
        (status = 401, description = "Incorrect username or password", body = ErrorResponse)
    )
)]
async fn login<U: UserRepository, R: RoleRepository>(
    State(auth): State<Arc<AuthService<U, R>>>,
    Form(request): Form<LoginRequest>,
) -> UserResult<Json<TokenResponse>> {
    let token = auth.login(request).await?;
    Ok(Json(token))
}

/// Return the authenticated user
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn me<U: UserRepository, R: RoleRepository>(
    State(auth): State<Arc<AuthService<U, R>>>,
    Extension(identity): Extension<Identity>,
) -> UserResult<Json<UserResponse>> {
    let user = auth.current_user(identity.user_id).await?;
    Ok(Json(user.into()))
}

/// Invalidate the presented token
#[utoipa::path(
    post,
    path = "/logout",
    tag = TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn logout<U: UserRepository, R: RoleRepository>(
    State(auth): State<Arc<AuthService<U, R>>>,
    Extension(claims): Extension<Claims>,
) -> UserResult<Json<LogoutResponse>> {
    auth.logout(&claims).await?;
    Ok(Json(LogoutResponse {
        message: "Successfully logged out".to_string(),
    }))
}
