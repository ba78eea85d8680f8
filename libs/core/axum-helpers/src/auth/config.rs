//! JWT configuration, loaded the same way as the other `FromEnv` configs.

use core_config::{ConfigError, FromEnv, env_parse_or_default, env_required};

/// Default access-token lifetime in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 240;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `TOKEN_TTL_MINUTES` (optional) - defaults to 240
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Token lifetime in minutes
    pub ttl_minutes: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and the default TTL.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }

    pub fn with_ttl_minutes(mut self, ttl_minutes: i64) -> Self {
        self.ttl_minutes = ttl_minutes;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::InvalidValue {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_minutes = env_parse_or_default("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
        if ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_MINUTES".to_string(),
                details: format!("must be positive (got {})", ttl_minutes),
            });
        }

        Ok(Self {
            secret,
            ttl_minutes,
        })
    }
}
