//! Utilidades compartidas por los tests unitarios

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{EnvironmentConfig, DEFAULT_VEHICLE_DATA_API_URL};
use crate::middleware::AuthenticatedUser;
use crate::models::{User, UserRole, Vehicle, VehicleSpecs};
use crate::repositories::Repositories;
use crate::services::VehicleDataProvider;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Proveedor de datos de vehículos con respuesta fija
pub struct StubVehicleData {
    specs: Option<VehicleSpecs>,
    calls: AtomicUsize,
}

impl StubVehicleData {
    pub fn returning(specs: VehicleSpecs) -> Self {
        Self {
            specs: Some(specs),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            specs: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VehicleDataProvider for StubVehicleData {
    async fn fetch_specs(&self, _make: &str, _model: &str, _year: i32) -> AppResult<VehicleSpecs> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.specs
            .clone()
            .ok_or_else(|| AppError::ExternalApi("service unavailable".to_string()))
    }
}

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration: 3600,
        bcrypt_cost: 4,
        cors_origins: vec![],
        database_url: None,
        vehicle_data_api_url: DEFAULT_VEHICLE_DATA_API_URL.to_string(),
        vehicle_data_api_key: None,
    }
}

pub fn test_state() -> AppState {
    test_state_with(Arc::new(StubVehicleData::returning(VehicleSpecs::default())))
}

pub fn test_state_with(vehicle_data: Arc<dyn VehicleDataProvider>) -> AppState {
    AppState::new(test_config(), Repositories::in_memory(), vehicle_data)
}

/// Inserta un usuario con los roles dados, sin pasar por el registro
pub async fn insert_user(state: &AppState, username: &str, roles: &[UserRole]) -> User {
    let mut user = User::new(
        username.to_string(),
        format!("{}@mail.com", username),
        "not-a-real-hash".to_string(),
    );
    user.roles = roles.to_vec();
    state.repositories.users.create(user).await.unwrap()
}

pub fn authenticated(user: &User) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: user.id,
        email: user.email.clone(),
        roles: user.roles.clone(),
    }
}

/// Inserta un vehículo directamente en el repositorio
pub async fn insert_vehicle(state: &AppState, owner_id: Uuid, daily_price: Decimal) -> Vehicle {
    let now = Utc::now();
    let vehicle = Vehicle {
        id: Uuid::new_v4(),
        owner_id,
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        color: "Blue".to_string(),
        year: 2020,
        license_plate: format!("T-{}", &Uuid::new_v4().simple().to_string()[..8]),
        photo_urls: vec![],
        daily_price,
        rental_conditions: "No smoking".to_string(),
        vehicle_class: None,
        drive: None,
        fuel_type: None,
        transmission: None,
        combination_mpg: None,
        displacement: None,
        created_at: now,
        updated_at: now,
    };
    state.repositories.vehicles.create(vehicle).await.unwrap()
}
