use std::sync::Arc;
use tracing::{info, warn};

use crate::controllers::user_controller::UserController;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, LoginResponse, SignupRequest};
use crate::repositories::UserRepository;
use crate::services::{password_service, JwtService};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError, AppResult};

pub struct AuthController {
    users: Arc<dyn UserRepository>,
    jwt: JwtService,
    registration: UserController,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.repositories.users.clone(),
            jwt: state.jwt.clone(),
            registration: UserController::new(state),
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        let user = self.registration.register(request).await?;
        let token = self.jwt.generate_token(&user)?;

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() || request.password.is_empty() {
            return Err(bad_request_error("Email and password are required"));
        }

        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            warn!("🔒 Login con email desconocido: {}", email);
            invalid()
        })?;

        if !password_service::verify_password(&request.password, &user.password_hash)? {
            warn!("🔒 Contraseña incorrecta para {}", email);
            return Err(invalid());
        }

        let token = self.jwt.generate_token(&user)?;
        info!("✅ Login exitoso: {}", user.email);
        Ok(LoginResponse { token })
    }
}
