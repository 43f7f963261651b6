//! Modelos de autenticación

use serde::{Deserialize, Serialize};

use super::user::UserRole;

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub email: String,
    pub roles: Vec<UserRole>,
    pub exp: i64,
    pub iat: i64,
}
