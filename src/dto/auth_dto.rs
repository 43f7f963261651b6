use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user_dto::UserProfile;

// Signup request. Los campos ausentes llegan vacíos y se rechazan en el controlador.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

impl SignupRequest {
    /// Quita espacios y normaliza el email en minúsculas
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
        }
    }

    pub fn has_missing_fields(&self) -> bool {
        self.username.is_empty() || self.email.is_empty() || self.password.is_empty()
    }
}

// Login request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// Token emitido en el login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// Token más el perfil, devuelto en signup y al cambiar de rol
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}
