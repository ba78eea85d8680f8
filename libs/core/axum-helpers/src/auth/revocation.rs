use async_trait::async_trait;
use thiserror::Error;

/// Failure talking to the revocation backend
#[derive(Debug, Error)]
#[error("revocation store error: {0}")]
pub struct RevocationError(pub String);

/// Pluggable revocation hook consulted before a verified token is trusted.
///
/// The default deployment is stateless: logout is an acknowledgement only
/// and tokens stay valid until natural expiry, so [`NoopRevocation`] is
/// used. A store-backed implementation (keyed by `jti`, entries expiring
/// with the token) can be swapped in to support immediate logout without
/// changing the auth service.
#[async_trait]
pub trait RevocationCheck: Send + Sync {
    /// Whether the token with this `jti` has been revoked
    async fn is_revoked(&self, jti: &str) -> Result<bool, RevocationError>;

    /// Record a revocation, kept for `ttl_seconds` (the token's remaining life)
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), RevocationError>;
}

/// Stateless default: nothing is ever revoked
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRevocation;

#[async_trait]
impl RevocationCheck for NoopRevocation {
    async fn is_revoked(&self, _jti: &str) -> Result<bool, RevocationError> {
        Ok(false)
    }

    async fn revoke(&self, _jti: &str, _ttl_seconds: u64) -> Result<(), RevocationError> {
        Ok(())
    }
}
