use axum_helpers::JwtConfig;
use core_config::server::ServerConfig;
use core_config::{ConfigError, Environment, FromEnv};
use database::mongodb::MongoConfig;
use database::postgres::PostgresConfig;

/// Full application configuration, loaded from the environment once at
/// startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    /// Present only when MONGODB_URL is set; the book catalog is mounted
    /// conditionally on it.
    pub mongo: Option<MongoConfig>,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongo = if std::env::var("MONGODB_URL").is_ok() {
            Some(MongoConfig::from_env()?)
        } else {
            None
        };

        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            postgres: PostgresConfig::from_env()?,
            mongo,
            jwt: JwtConfig::from_env()?,
        })
    }
}
