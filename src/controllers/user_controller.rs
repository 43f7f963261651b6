use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, SignupRequest};
use crate::dto::user_dto::{EditUserRequest, UserProfile};
use crate::middleware::AuthenticatedUser;
use crate::models::{User, UserRole};
use crate::repositories::{Repositories, UserRepository};
use crate::services::{password_service, JwtService};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

pub struct UserController {
    users: Arc<dyn UserRepository>,
    repositories: Repositories,
    jwt: JwtService,
    bcrypt_cost: u32,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.repositories.users.clone(),
            repositories: state.repositories.clone(),
            jwt: state.jwt.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    /// Registra un usuario nuevo con rol `tenant`
    pub async fn register(&self, request: SignupRequest) -> AppResult<User> {
        let request = request.normalized();
        if request.has_missing_fields() {
            return Err(bad_request_error("All fields are required"));
        }
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(bad_request_error("User with this email already exists"));
        }
        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(bad_request_error("Username is already taken"));
        }

        let password_hash = password_service::hash_password(&request.password, self.bcrypt_cost)?;
        let user = self
            .users
            .create(User::new(request.username, request.email, password_hash))
            .await?;

        info!("👤 Usuario registrado: {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn create_user(&self, request: SignupRequest) -> AppResult<UserProfile> {
        Ok(self.register(request).await?.into())
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserProfile>> {
        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    pub async fn get_profile(&self, id: Uuid) -> AppResult<UserProfile> {
        let user = self.find_user(id).await?;
        Ok(user.into())
    }

    pub async fn edit_user(&self, id: Uuid, request: EditUserRequest) -> AppResult<UserProfile> {
        let request = request.normalized();
        if request.is_empty() {
            return Err(bad_request_error(
                "At least one field (username or email) is required",
            ));
        }
        request.validate()?;

        let mut user = self.find_user(id).await?;

        if let Some(username) = request.username {
            if username != user.username {
                if self.users.find_by_username(&username).await?.is_some() {
                    return Err(bad_request_error("Username is already taken"));
                }
                user.username = username;
            }
        }
        if let Some(email) = request.email {
            if email != user.email {
                if self.users.find_by_email(&email).await?.is_some() {
                    return Err(bad_request_error("User with this email already exists"));
                }
                user.email = email;
            }
        }

        let user = self
            .users
            .update(user)
            .await?
            .ok_or_else(|| not_found_error("User"))?;

        info!("✏️ Usuario actualizado: {}", user.id);
        Ok(user.into())
    }

    /// Elimina el usuario, sus vehículos y sus reservas como cliente
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        if !self.repositories.delete_user(id).await? {
            return Err(not_found_error("User"));
        }
        info!("🗑️ Usuario eliminado: {}", id);
        Ok(())
    }

    /// Agrega un rol al usuario y emite un token nuevo con los roles actualizados.
    /// Solo el propio usuario o un admin pueden hacerlo.
    pub async fn add_role(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        role: UserRole,
    ) -> AppResult<AuthResponse> {
        if actor.user_id != id && !actor.is_admin() {
            return Err(AppError::Forbidden(
                "You can only change your own roles".to_string(),
            ));
        }

        let mut user = self.find_user(id).await?;
        if user.add_role(role) {
            user = self
                .users
                .update(user)
                .await?
                .ok_or_else(|| not_found_error("User"))?;
            info!("🎭 Rol {} agregado al usuario {}", role, id);
        }

        let token = self.jwt.generate_token(&user)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    async fn find_user(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User"))
    }
}
