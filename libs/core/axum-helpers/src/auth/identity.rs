use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use uuid::Uuid;

/// The authenticated principal for the current request.
///
/// Inserted into request extensions by the auth middleware after the bearer
/// token has been verified and the account confirmed active. Handlers take
/// it as an extractor argument; a missing identity means the route was
/// mounted without the middleware, which is rejected as unauthorized rather
/// than panicking.
#[derive(Clone, Debug, Serialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))
    }
}
