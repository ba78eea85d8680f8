pub mod config;
pub mod connector;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config};
pub use mongodb::Database;
