//! # Axum Helpers
//!
//! Shared plumbing for the Stockroom HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT token codec, bearer identity extraction, pluggable
//!   token revocation
//! - **[`errors`]**: structured error responses ([`AppError`])
//! - **[`extractors`]**: validated JSON/query bodies, UUID path params
//! - **[`pagination`]**: the `{data, metadata}` list envelope
//! - **[`server`]**: router assembly, Swagger UI, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod pagination;
pub mod server;
pub mod shutdown;

pub use auth::{
    Claims, Identity, JwtConfig, NoopRevocation, RevocationCheck, RevocationError, TokenCodec,
    TokenError,
};
pub use errors::{AppError, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson, ValidatedQuery};
pub use pagination::{Page, PaginationMetadata};
pub use server::{create_app, create_router};
pub use shutdown::shutdown_signal;
