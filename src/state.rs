//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;
use crate::services::{JwtService, VehicleDataProvider};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub repositories: Repositories,
    pub jwt: JwtService,
    pub vehicle_data: Arc<dyn VehicleDataProvider>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        repositories: Repositories,
        vehicle_data: Arc<dyn VehicleDataProvider>,
    ) -> Self {
        let jwt = JwtService::from_config(&config);
        Self {
            config,
            repositories,
            jwt,
            vehicle_data,
        }
    }
}
