use std::sync::Arc;

use axum_helpers::{Claims, RevocationCheck, TokenCodec, TokenError};
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::UserError;
use crate::models::{
    CreateRole, LoginRequest, RegisterRequest, RegisterResponse, Role, TokenResponse, UpdateRole,
    UpdateUser, User, UserFilter, DEFAULT_ROLE,
};
use crate::password::{hash_password, verify_dummy, verify_password};
use crate::repository::{RoleRepository, UserRepository};

/// Registration, login and token verification on top of a user store.
pub struct AuthService<U, R> {
    users: Arc<U>,
    roles: Arc<R>,
    codec: Arc<TokenCodec>,
    revocation: Arc<dyn RevocationCheck>,
}

impl<U: UserRepository, R: RoleRepository> AuthService<U, R> {
    pub fn new(
        users: Arc<U>,
        roles: Arc<R>,
        codec: Arc<TokenCodec>,
        revocation: Arc<dyn RevocationCheck>,
    ) -> Self {
        Self {
            users,
            roles,
            codec,
            revocation,
        }
    }

    /// Creates the account and signs the user in. Email uniqueness is
    /// checked before username uniqueness, so a request clashing on both
    /// reports the email conflict.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, UserError> {
        if self.users.email_exists(&request.email).await? {
            return Err(UserError::DuplicateEmail);
        }
        if self.users.username_exists(&request.username).await? {
            return Err(UserError::DuplicateUsername);
        }

        let role = match request.role_id {
            Some(role_id) => self
                .roles
                .get_by_id(role_id)
                .await?
                .ok_or(UserError::RoleNotFound(role_id))?,
            None => self
                .roles
                .get_by_name(DEFAULT_ROLE)
                .await?
                .ok_or_else(|| UserError::DefaultRoleMissing(DEFAULT_ROLE.to_string()))?,
        };

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: request.email,
            username: request.username,
            hashed_password: hash_password(&request.password)?,
            full_name: request.full_name,
            is_active: true,
            role_id: Some(role.id),
            created_at: now,
            updated_at: now,
        };
        let user = self.users.create(user).await?;
        info!(user_id = %user.id, "user registered");

        let issued = self
            .codec
            .issue(&user.username)
            .map_err(|_| UserError::InvalidToken)?;
        Ok(RegisterResponse {
            access_token: issued.token,
            token_type: "bearer".to_string(),
            user: user.into(),
        })
    }

    /// Unknown usernames and wrong passwords answer identically. A dummy
    /// hash is verified for unknown usernames to keep the timing flat.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, UserError> {
        let user = match self.users.get_by_username(&request.username).await? {
            Some(user) => user,
            None => {
                verify_dummy(&request.password);
                return Err(UserError::InvalidCredentials);
            }
        };
        if !verify_password(&request.password, &user.hashed_password) {
            return Err(UserError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(UserError::InactiveUser);
        }

        let issued = self
            .codec
            .issue(&user.username)
            .map_err(|_| UserError::InvalidToken)?;
        info!(user_id = %user.id, "user logged in");
        Ok(TokenResponse::bearer(issued.token))
    }

    /// Verifies the token, checks the revocation list and loads the user.
    pub async fn resolve_identity(&self, token: &str) -> Result<(User, Claims), UserError> {
        let claims = self.codec.verify(token).map_err(|err| match err {
            TokenError::Expired => UserError::ExpiredToken,
            TokenError::Invalid => UserError::InvalidToken,
        })?;

        if self
            .revocation
            .is_revoked(&claims.jti)
            .await
            .map_err(|err| UserError::Revocation(err.to_string()))?
        {
            return Err(UserError::InvalidToken);
        }

        let user = self
            .users
            .get_by_username(&claims.sub)
            .await?
            .ok_or(UserError::InvalidToken)?;
        if !user.is_active {
            return Err(UserError::InactiveUser);
        }
        Ok((user, claims))
    }

    pub async fn current_user(&self, id: Uuid) -> Result<User, UserError> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or(UserError::UserNotFound(id))
    }

    /// Acknowledges logout. With a revocation store configured the token
    /// is blocked for its remaining lifetime; without one this is a
    /// stateless no-op, matching bearer-token semantics.
    pub async fn logout(&self, claims: &Claims) -> Result<(), UserError> {
        let remaining = TokenCodec::remaining_seconds(claims);
        if remaining > 0 {
            self.revocation
                .revoke(&claims.jti, remaining)
                .await
                .map_err(|err| UserError::Revocation(err.to_string()))?;
        }
        Ok(())
    }
}

/// Administrative user listing and maintenance.
pub struct UserService<U> {
    users: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    pub async fn list(&self, filter: &UserFilter) -> Result<(Vec<User>, u64), UserError> {
        self.users.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<User, UserError> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or(UserError::UserNotFound(id))
    }

    pub async fn update(&self, id: Uuid, mut update: UpdateUser) -> Result<User, UserError> {
        let mut user = self.get(id).await?;
        if let Some(password) = update.password.take() {
            user.hashed_password = hash_password(&password)?;
        }
        user.apply_update(update);
        self.users.update(user).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), UserError> {
        if !self.users.delete(id).await? {
            return Err(UserError::UserNotFound(id));
        }
        Ok(())
    }
}

pub struct RoleService<R> {
    roles: Arc<R>,
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(roles: Arc<R>) -> Self {
        Self { roles }
    }

    pub async fn create(&self, create: CreateRole) -> Result<Role, UserError> {
        if self.roles.get_by_name(&create.name).await?.is_some() {
            return Err(UserError::DuplicateRole(create.name));
        }
        let now = Utc::now();
        self.roles
            .create(Role {
                id: Uuid::new_v4(),
                name: create.name,
                description: create.description,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    pub async fn list(&self) -> Result<Vec<Role>, UserError> {
        self.roles.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Role, UserError> {
        self.roles
            .get_by_id(id)
            .await?
            .ok_or(UserError::RoleNotFound(id))
    }

    pub async fn update(&self, id: Uuid, update: UpdateRole) -> Result<Role, UserError> {
        let mut role = self.get(id).await?;
        role.apply_update(update);
        self.roles.update(role).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), UserError> {
        if !self.roles.delete(id).await? {
            return Err(UserError::RoleNotFound(id));
        }
        Ok(())
    }
}
