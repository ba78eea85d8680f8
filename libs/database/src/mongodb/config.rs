#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// MongoDB connection configuration
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection URL, e.g. `mongodb://localhost:27017`
    pub url: String,

    /// Database name
    pub database: String,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
        }
    }
}

/// Load MongoConfig from environment variables.
///
/// - `MONGODB_URL` (required)
/// - `MONGODB_DB` (default: "stockroom")
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("MONGODB_URL")?,
            database: env_or_default("MONGODB_DB", "stockroom"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("mongodb://localhost:27017", "testdb");
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.database, "testdb");
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DB", None::<&str>),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://localhost:27017");
                assert_eq!(config.database, "stockroom");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_missing_url() {
        temp_env::with_var_unset("MONGODB_URL", || {
            assert!(MongoConfig::from_env().is_err());
        });
    }
}
