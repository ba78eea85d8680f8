pub mod config;
pub mod connector;

pub use config::PostgresConfig;
pub use connector::{connect, connect_from_config, connect_with_retry, run_migrations};
