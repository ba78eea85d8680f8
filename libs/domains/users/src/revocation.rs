use async_trait::async_trait;
use axum_helpers::{RevocationCheck, RevocationError};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

const KEY_PREFIX: &str = "auth:revoked:";

/// Redis-backed token revocation list. Entries expire together with the
/// token they block, so the set stays bounded.
#[derive(Clone)]
pub struct RedisRevocationList {
    connection: ConnectionManager,
}

impl RedisRevocationList {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    fn key(jti: &str) -> String {
        format!("{KEY_PREFIX}{jti}")
    }
}

#[async_trait]
impl RevocationCheck for RedisRevocationList {
    async fn is_revoked(&self, jti: &str) -> Result<bool, RevocationError> {
        let mut connection = self.connection.clone();
        let exists: bool = connection
            .exists(Self::key(jti))
            .await
            .map_err(|err| RevocationError(err.to_string()))?;
        Ok(exists)
    }

    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> Result<(), RevocationError> {
        let mut connection = self.connection.clone();
        connection
            .set_ex::<_, _, ()>(Self::key(jti), 1, ttl_seconds)
            .await
            .map_err(|err| RevocationError(err.to_string()))?;
        Ok(())
    }
}
