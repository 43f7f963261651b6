//! Middleware de autenticación JWT
//!
//! Este módulo maneja la extracción del token Bearer, la verificación
//! del usuario autenticado y los guards por rol.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::UserRole,
    services::JwtService,
    state::AppState,
    utils::errors::{AppError, AppResult},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<UserRole>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }
}

/// Rechaza con 403 si el usuario no tiene el rol
pub fn require_role(user: &AuthenticatedUser, role: UserRole) -> AppResult<()> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("Access denied: {} role required", role)))
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let claims = state
        .jwt
        .validate_token(token)
        .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;
    let user_id = JwtService::user_id(&claims)?;

    // Verificar que el usuario sigue existiendo; los roles se toman de la base
    let user = state
        .repositories
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    debug!("🔐 Usuario autenticado: {}", user.email);

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        roles: user.roles,
    });

    Ok(next.run(request).await)
}

/// Middleware para verificar permisos de admin
pub async fn admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&user, UserRole::Admin)?;
    Ok(next.run(request).await)
}

/// Middleware para verificar el rol owner
pub async fn owner_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&user, UserRole::Owner)?;
    Ok(next.run(request).await)
}

/// Middleware para verificar el rol tenant
pub async fn tenant_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(&user, UserRole::Tenant)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_role_is_exact_membership() {
        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "admin@mail.com".to_string(),
            roles: vec![UserRole::Admin],
        };
        assert!(require_role(&user, UserRole::Admin).is_ok());
        assert!(matches!(
            require_role(&user, UserRole::Owner),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let request = axum::http::Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), Some("abc.def.ghi"));

        let request = axum::http::Request::builder()
            .header(header::AUTHORIZATION, "Basic xyz")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), None);
    }
}
