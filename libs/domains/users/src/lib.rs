//! Users Domain
//!
//! Accounts, roles and bearer-token authentication.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (auth, users, roles)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Registration, login, token verification
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use axum_helpers::{JwtConfig, NoopRevocation, TokenCodec};
//! use domain_users::{auth_handlers, repository::InMemoryUserStore, service::AuthService};
//!
//! let store = Arc::new(InMemoryUserStore::new());
//! let codec = Arc::new(TokenCodec::new(&JwtConfig::new(
//!     "a-development-secret-of-32-chars!".to_string(),
//! )));
//! let auth = Arc::new(AuthService::new(
//!     store.clone(),
//!     store,
//!     codec,
//!     Arc::new(NoopRevocation),
//! ));
//!
//! let router = auth_handlers::router(auth);
//! ```

pub mod auth_handlers;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod revocation;
pub mod role_handlers;
pub mod service;
pub mod user_handlers;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{
    CreateRole, LoginRequest, LogoutResponse, RegisterRequest, RegisterResponse, Role,
    TokenResponse, UpdateRole, UpdateUser, User, UserFilter, UserResponse, DEFAULT_ROLE,
};
pub use postgres::{PgRoleRepository, PgUserRepository};
pub use repository::{InMemoryUserStore, RoleRepository, UserRepository};
pub use revocation::RedisRevocationList;
pub use service::{AuthService, RoleService, UserService};
