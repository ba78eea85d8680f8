use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use axum_helpers::{AppError, Identity};

use crate::repository::{RoleRepository, UserRepository};
use crate::service::AuthService;

/// Rejects requests without a valid bearer token and stashes the caller's
/// identity and claims in the request extensions.
pub async fn require_auth<U, R>(
    State(auth): State<Arc<AuthService<U, R>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError>
where
    U: UserRepository + 'static,
    R: RoleRepository + 'static,
{
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    let (user, claims) = auth.resolve_identity(&token).await?;
    request.extensions_mut().insert(Identity {
        user_id: user.id,
        username: user.username,
    });
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}
