use super::config::JwtConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Token identifier, used as the revocation key
    pub jti: String,
}

/// Token verification failure.
///
/// Expired and malformed tokens are distinguished internally (logging,
/// revocation TTL math) but both surface as `Unauthorized` to clients.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token invalid")]
    Invalid,
}

/// A freshly signed token together with its claims
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Signs and verifies bearer tokens with a symmetric HS256 key.
///
/// Verification runs with zero leeway so expiry is exact; a token issued
/// with a 240-minute lifetime is accepted at +239min and rejected at
/// +241min.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::minutes(config.ttl_minutes),
        }
    }

    /// Sign a token for the given subject, expiring `ttl` from now
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Sign a token as if issued at `issued_at` (exposed for expiry tests)
    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (issued_at + self.ttl).timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            TokenError::Invalid
        })?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        Ok(data.claims)
    }

    /// Seconds until `claims.exp`, clamped to zero
    pub fn remaining_seconds(claims: &Claims) -> u64 {
        (claims.exp - Utc::now().timestamp()).max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(&JwtConfig::new("unit-test-secret-that-is-long-enough!!"))
    }

    #[test]
    fn test_round_trip() {
        let codec = codec();
        let issued = codec.issue("alice").unwrap();
        let claims = codec.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.jti, issued.claims.jti);
        assert_eq!(claims.exp - claims.iat, 240 * 60);
    }

    #[test]
    fn test_valid_just_before_expiry() {
        let codec = codec();
        let issued = codec
            .issue_at("alice", Utc::now() - Duration::minutes(239))
            .unwrap();
        assert!(codec.verify(&issued.token).is_ok());
    }

    #[test]
    fn test_expired_just_after_expiry() {
        let codec = codec();
        let issued = codec
            .issue_at("alice", Utc::now() - Duration::minutes(241))
            .unwrap();
        assert_eq!(codec.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let codec = codec();
        let issued = codec.issue("alice").unwrap();
        let mut tampered = issued.token.clone();
        tampered.pop();
        tampered.push('x');
        assert_eq!(codec.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_key_is_invalid() {
        let issued = codec().issue("alice").unwrap();
        let other =
            TokenCodec::new(&JwtConfig::new("a-different-secret-also-long-enough!!!"));
        assert_eq!(other.verify(&issued.token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(codec().verify("not-a-jwt"), Err(TokenError::Invalid));
    }
}
