use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use crate::entity::{role, user};
use crate::error::UserError;
use crate::models::{Role, User, UserFilter};
use crate::repository::{RoleRepository, UserRepository};

pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique-violation errors carry the constraint name, which tells us which
/// column clashed.
fn map_unique_violation(err: sea_orm::DbErr) -> UserError {
    if let Some(SqlErr::UniqueConstraintViolation(details)) = err.sql_err() {
        if details.as_str().contains("email") {
            return UserError::DuplicateEmail;
        }
        if details.as_str().contains("username") {
            return UserError::DuplicateUsername;
        }
    }
    UserError::Database(err)
}

fn user_filter_condition(filter: &UserFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        condition = condition.add(
            Condition::any()
                .add(Expr::col(user::Column::Username).ilike(pattern.clone()))
                .add(Expr::col(user::Column::Email).ilike(pattern)),
        );
    }
    if let Some(is_active) = filter.is_active {
        condition = condition.add(user::Column::IsActive.eq(is_active));
    }
    condition
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: User) -> Result<User, UserError> {
        let active: user::ActiveModel = new_user.into();
        let model = active.insert(&self.db).await.map_err(map_unique_violation)?;
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserError> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserError> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn list(&self, filter: &UserFilter) -> Result<(Vec<User>, u64), UserError> {
        let condition = user_filter_condition(filter);

        // Counted before the window is applied, same condition.
        let total = user::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        let sort_column = match filter.sort_by.as_deref() {
            Some("email") => user::Column::Email,
            Some("created_at") => user::Column::CreatedAt,
            _ => user::Column::Username,
        };
        let direction = if filter.descending() {
            sea_orm::Order::Desc
        } else {
            sea_orm::Order::Asc
        };

        let models = user::Entity::find()
            .filter(condition)
            .order_by(sort_column, direction)
            .offset(filter.skip)
            .limit(filter.limit)
            .all(&self.db)
            .await?;
        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, updated: User) -> Result<User, UserError> {
        let active: user::ActiveModel = updated.into();
        let model = active.update(&self.db).await.map_err(map_unique_violation)?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserError> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

pub struct PgRoleRepository {
    db: DatabaseConnection,
}

impl PgRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn create(&self, new_role: Role) -> Result<Role, UserError> {
        let name = new_role.name.clone();
        let active: role::ActiveModel = new_role.into();
        let model = active.insert(&self.db).await.map_err(|err| {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                UserError::DuplicateRole(name)
            } else {
                UserError::Database(err)
            }
        })?;
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Role>, UserError> {
        let model = role::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Role>, UserError> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Role>, UserError> {
        let models = role::Entity::find()
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, updated: Role) -> Result<Role, UserError> {
        let name = updated.name.clone();
        let active: role::ActiveModel = updated.into();
        let model = active.update(&self.db).await.map_err(|err| {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                UserError::DuplicateRole(name)
            } else {
                UserError::Database(err)
            }
        })?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserError> {
        let still_assigned = user::Entity::find()
            .filter(user::Column::RoleId.eq(id))
            .count(&self.db)
            .await?;
        if still_assigned > 0 {
            return Err(UserError::RoleInUse(still_assigned));
        }
        let result = role::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
