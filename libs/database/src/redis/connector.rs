use redis::aio::ConnectionManager;
use tracing::info;

use crate::common::DatabaseError;

/// Connect to Redis and return a connection manager.
///
/// The manager reconnects automatically, so it can be cloned and shared
/// across request handlers.
pub async fn connect(url: &str) -> Result<ConnectionManager, DatabaseError> {
    let client = redis::Client::open(url)?;
    let manager = ConnectionManager::new(client).await?;

    info!("Successfully connected to Redis");
    Ok(manager)
}
