//! Middlewares HTTP
//!
//! Autenticación JWT, guards por rol y CORS.

pub mod auth;
pub mod cors;

pub use auth::{auth_middleware, require_role, AuthenticatedUser};
pub use cors::cors_layer;
