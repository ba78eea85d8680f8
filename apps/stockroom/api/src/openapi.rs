use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        description = "Inventory backend: accounts, roles, product catalog with derived stock status, and an optional MongoDB book catalog"
    ),
    components(schemas(axum_helpers::ErrorResponse)),
    modifiers(&SecurityAddon)
)]
struct BaseDoc;

/// Registers the `bearer` security scheme so Swagger UI can authorize
/// requests against the protected endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// The merged document behind `/docs` and `/api-docs/openapi.json`.
pub fn build() -> utoipa::openapi::OpenApi {
    let mut doc = BaseDoc::openapi();
    doc.merge(domain_users::auth_handlers::ApiDoc::openapi());
    doc.merge(domain_users::user_handlers::ApiDoc::openapi());
    doc.merge(domain_users::role_handlers::ApiDoc::openapi());
    doc.merge(domain_catalog::product_handlers::ApiDoc::openapi());
    doc.merge(domain_catalog::category_handlers::ApiDoc::openapi());
    doc.merge(domain_books::handlers::ApiDoc::openapi());
    doc
}
