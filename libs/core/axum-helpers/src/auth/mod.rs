//! Bearer-token authentication building blocks.
//!
//! The [`TokenCodec`] signs and verifies JWTs, [`Identity`] is the
//! per-request authenticated principal, and [`RevocationCheck`] is the
//! pluggable hook consulted before a token is trusted. The middleware that
//! wires these together lives in the users domain, next to the account
//! store it needs for active-flag checks.

pub mod config;
pub mod identity;
pub mod revocation;
pub mod token;

pub use config::JwtConfig;
pub use identity::Identity;
pub use revocation::{NoopRevocation, RevocationCheck, RevocationError};
pub use token::{Claims, IssuedToken, TokenCodec, TokenError};
