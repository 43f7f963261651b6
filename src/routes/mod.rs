//! Rutas HTTP
//!
//! Un router por recurso bajo `/api`, más `/health`.

pub mod auth_routes;
pub mod rental_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/api/users", user_routes::create_user_router(state.clone()))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router(state.clone()))
        .nest("/api/rentals", rental_routes::create_rental_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "vehicle-rental",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
