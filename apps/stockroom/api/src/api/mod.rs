//! Route assembly: every domain router mounted under `/api`, with bearer
//! auth enforced on everything except registration and login.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum_helpers::{NoopRevocation, TokenCodec};
use database::mongodb::Database;
use domain_books::{BookService, MongoBookRepository, handlers as book_handlers};
use domain_catalog::{
    CategoryService, PgCatalogRepository, ProductService, category_handlers, product_handlers,
};
use domain_users::middleware::require_auth;
use domain_users::{
    AuthService, PgRoleRepository, PgUserRepository, RoleService, UserService, auth_handlers,
    role_handlers, user_handlers,
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use crate::config::AppConfig;

/// Landing payload for `GET /`.
pub async fn banner() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/docs",
    }))
}

/// Wire repositories, services and routers together.
///
/// The book routes are mounted only when a MongoDB database handle is
/// provided; the rest of the API is unaffected by its absence.
pub fn routes(config: &AppConfig, db: DatabaseConnection, mongo: Option<Database>) -> Router {
    let users = Arc::new(PgUserRepository::new(db.clone()));
    let roles = Arc::new(PgRoleRepository::new(db.clone()));
    let codec = Arc::new(TokenCodec::new(&config.jwt));
    let auth = Arc::new(AuthService::new(
        users.clone(),
        roles.clone(),
        codec,
        Arc::new(NoopRevocation),
    ));

    let catalog = Arc::new(PgCatalogRepository::new(db));

    let mut protected = Router::new()
        .nest(
            "/products",
            product_handlers::router(ProductService::new(catalog.clone(), catalog.clone())),
        )
        .nest(
            "/categories",
            category_handlers::router(CategoryService::new(catalog)),
        )
        .nest("/users", user_handlers::router(UserService::new(users)))
        .nest("/roles", role_handlers::router(RoleService::new(roles)));

    if let Some(mongo) = mongo {
        let books = Arc::new(MongoBookRepository::new(&mongo));
        protected = protected.nest("/books", book_handlers::router(BookService::new(books)));
    }

    let protected = protected.route_layer(from_fn_with_state(
        auth.clone(),
        require_auth::<PgUserRepository, PgRoleRepository>,
    ));

    Router::new()
        .nest("/auth", auth_handlers::router(auth))
        .merge(protected)
}
