use mongodb::{Client, Database, options::ClientOptions};
use tracing::info;

use super::MongoConfig;
use crate::common::DatabaseError;

/// Connect to MongoDB and return the client
pub async fn connect(url: &str) -> Result<Client, DatabaseError> {
    let options = ClientOptions::parse(url).await?;
    let client = Client::with_options(options)?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Connect using a MongoConfig, returning a handle to the configured database
pub async fn connect_from_config(config: &MongoConfig) -> Result<Database, DatabaseError> {
    let client = connect(&config.url).await?;
    Ok(client.database(&config.database))
}
