use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::UserError;
use crate::models::{Role, User, UserFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> Result<User, UserError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, UserError>;
    async fn email_exists(&self, email: &str) -> Result<bool, UserError>;
    async fn username_exists(&self, username: &str) -> Result<bool, UserError>;
    async fn list(&self, filter: &UserFilter) -> Result<(Vec<User>, u64), UserError>;
    async fn update(&self, user: User) -> Result<User, UserError>;
    async fn delete(&self, id: Uuid) -> Result<bool, UserError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn create(&self, role: Role) -> Result<Role, UserError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Role>, UserError>;
    async fn get_by_name(&self, name: &str) -> Result<Option<Role>, UserError>;
    async fn list(&self) -> Result<Vec<Role>, UserError>;
    async fn update(&self, role: Role) -> Result<Role, UserError>;
    async fn delete(&self, id: Uuid) -> Result<bool, UserError>;
}

/// In-memory store backing both repositories. Used by tests and local runs
/// without Postgres.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    roles: Arc<RwLock<HashMap<Uuid, Role>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail);
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::DuplicateUsername);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserError> {
        Ok(self.users.read().await.values().any(|u| u.email == email))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|u| u.username == username))
    }

    async fn list(&self, filter: &UserFilter) -> Result<(Vec<User>, u64), UserError> {
        let users = self.users.read().await;
        let mut matched: Vec<User> = users
            .values()
            .filter(|u| {
                if let Some(search) = &filter.search {
                    let needle = search.to_lowercase();
                    if !u.username.to_lowercase().contains(&needle)
                        && !u.email.to_lowercase().contains(&needle)
                    {
                        return false;
                    }
                }
                if let Some(is_active) = filter.is_active {
                    if u.is_active != is_active {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        match filter.sort_by.as_deref() {
            Some("email") => matched.sort_by(|a, b| a.email.cmp(&b.email)),
            Some("created_at") => matched.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            _ => matched.sort_by(|a, b| a.username.cmp(&b.username)),
        }
        if filter.descending() {
            matched.reverse();
        }

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(UserError::DuplicateEmail);
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(UserError::DuplicateUsername);
        }
        if !users.contains_key(&user.id) {
            return Err(UserError::UserNotFound(user.id));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl RoleRepository for InMemoryUserStore {
    async fn create(&self, role: Role) -> Result<Role, UserError> {
        let mut roles = self.roles.write().await;
        if roles.values().any(|r| r.name == role.name) {
            return Err(UserError::DuplicateRole(role.name));
        }
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Role>, UserError> {
        Ok(self.roles.read().await.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Role>, UserError> {
        Ok(self
            .roles
            .read()
            .await
            .values()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Role>, UserError> {
        let mut roles: Vec<Role> = self.roles.read().await.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn update(&self, role: Role) -> Result<Role, UserError> {
        let mut roles = self.roles.write().await;
        if roles
            .values()
            .any(|r| r.id != role.id && r.name == role.name)
        {
            return Err(UserError::DuplicateRole(role.name));
        }
        if !roles.contains_key(&role.id) {
            return Err(UserError::RoleNotFound(role.id));
        }
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserError> {
        let still_assigned = self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.role_id == Some(id))
            .count() as u64;
        if still_assigned > 0 {
            return Err(UserError::RoleInUse(still_assigned));
        }
        Ok(self.roles.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn sample_user(username: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            hashed_password: "hash".to_string(),
            full_name: None,
            is_active: true,
            role_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_before_username() {
        let store = InMemoryUserStore::new();
        UserRepository::create(&store, sample_user("ada", "ada@example.com"))
            .await
            .unwrap();

        let dup = sample_user("ada", "ada@example.com");
        let err = UserRepository::create(&store, dup).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail));
    }

    #[tokio::test]
    async fn list_filters_by_search_and_activity() {
        let store = InMemoryUserStore::new();
        UserRepository::create(&store, sample_user("ada", "ada@example.com"))
            .await
            .unwrap();
        let mut inactive = sample_user("grace", "grace@example.com");
        inactive.is_active = false;
        UserRepository::create(&store, inactive).await.unwrap();

        let filter = UserFilter {
            search: Some("GRACE".to_string()),
            ..Default::default()
        };
        let (users, total) = UserRepository::list(&store, &filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(users[0].username, "grace");

        let filter = UserFilter {
            is_active: Some(true),
            ..Default::default()
        };
        let (users, _) = UserRepository::list(&store, &filter).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ada");
    }

    #[tokio::test]
    async fn list_total_counts_beyond_the_page() {
        let store = InMemoryUserStore::new();
        for i in 0..5 {
            UserRepository::create(
                &store,
                sample_user(&format!("user{i}"), &format!("user{i}@example.com")),
            )
            .await
            .unwrap();
        }

        let filter = UserFilter {
            skip: 2,
            limit: 2,
            ..Default::default()
        };
        let (users, total) = UserRepository::list(&store, &filter).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(total, 5);
        assert_eq!(users[0].username, "user2");
    }

    #[tokio::test]
    async fn role_names_are_unique() {
        let store = InMemoryUserStore::new();
        let role = Role {
            id: Uuid::new_v4(),
            name: "admin".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        RoleRepository::create(&store, role.clone()).await.unwrap();

        let dup = Role {
            id: Uuid::new_v4(),
            ..role
        };
        let err = RoleRepository::create(&store, dup).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateRole(_)));
    }
}
