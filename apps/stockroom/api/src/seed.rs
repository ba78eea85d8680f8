use chrono::Utc;
use domain_users::{Role, RoleRepository, UserError};
use tracing::info;
use uuid::Uuid;

/// Roles guaranteed to exist before any registration is served.
const SEED_ROLES: [(&str, &str); 2] = [
    ("admin", "Administrator with full access"),
    ("user", "Default role assigned at registration"),
];

/// Idempotent: existing roles are left untouched. A failure here is fatal
/// for startup since registration depends on the "user" role.
pub async fn seed_roles<R: RoleRepository>(roles: &R) -> Result<(), UserError> {
    for (name, description) in SEED_ROLES {
        if roles.get_by_name(name).await?.is_some() {
            continue;
        }
        let now = Utc::now();
        roles
            .create(Role {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: Some(description.to_string()),
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(role = name, "seeded role");
    }
    Ok(())
}
