use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Role with name '{0}' already exists")]
    DuplicateRole(String),

    #[error("User with id {0} not found")]
    UserNotFound(Uuid),

    #[error("Username '{0}' not found")]
    UsernameNotFound(String),

    #[error("Role with id {0} not found")]
    RoleNotFound(Uuid),

    #[error("Role is still assigned to {0} user(s)")]
    RoleInUse(u64),

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Could not validate credentials")]
    ExpiredToken,

    #[error("Default role '{0}' not found. Please seed the database.")]
    DefaultRoleMissing(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Revocation store error: {0}")]
    Revocation(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail | UserError::DuplicateUsername => {
                AppError::Conflict(err.to_string())
            }
            UserError::DuplicateRole(_) | UserError::RoleInUse(_) => {
                AppError::Conflict(err.to_string())
            }
            UserError::UserNotFound(_)
            | UserError::UsernameNotFound(_)
            | UserError::RoleNotFound(_) => AppError::NotFound(err.to_string()),
            UserError::InvalidCredentials
            | UserError::InvalidToken
            | UserError::ExpiredToken => AppError::Unauthorized(err.to_string()),
            UserError::InactiveUser => AppError::BadRequest(err.to_string()),
            UserError::DefaultRoleMissing(_) => AppError::InternalServerError(err.to_string()),
            UserError::PasswordHash(details) => AppError::InternalServerError(details),
            UserError::Revocation(details) => AppError::InternalServerError(details),
            UserError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
