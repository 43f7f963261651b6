//! Hash y verificación de contraseñas con bcrypt

use crate::utils::errors::{AppError, AppResult};

pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(password, cost).map_err(|e| AppError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    bcrypt::verify(password, hash).map_err(|e| AppError::Hash(e.to_string()))
}
