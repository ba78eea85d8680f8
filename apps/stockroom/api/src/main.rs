//! Stockroom API server.
//!
//! Startup order matters: migrations run before role seeding, and role
//! seeding must succeed before the server accepts registrations.

use axum::routing::get;
use axum_helpers::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::RetryConfig;
use database::postgres::{connect_with_retry, run_migrations};
use domain_users::PgRoleRepository;
use tracing::info;

mod api;
mod config;
mod openapi;
mod seed;

use config::AppConfig;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = AppConfig::from_env()?;
    init_tracing(&config.environment);

    let db = connect_with_retry(config.postgres.clone(), RetryConfig::default()).await?;
    run_migrations::<migration::Migrator>(&db, "stockroom_api").await?;

    seed::seed_roles(&PgRoleRepository::new(db.clone()))
        .await
        .map_err(|e| eyre::eyre!("role seeding failed: {e}"))?;

    let mongo = match &config.mongo {
        Some(mongo_config) => {
            let handle = database::mongodb::connect_from_config(mongo_config).await?;
            info!(database = %mongo_config.database, "book catalog enabled");
            Some(handle)
        }
        None => {
            info!("MONGODB_URL not set, book catalog disabled");
            None
        }
    };

    let router = create_router(openapi::build(), api::routes(&config, db, mongo))
        .route("/", get(api::banner));

    create_app(router, &config.server).await?;

    info!("Stockroom API shutdown complete");
    Ok(())
}
