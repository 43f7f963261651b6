//! Modelo de Vehicle
//!
//! Vehículos publicados por los owners y sus ventanas de no disponibilidad.
//! Mapea a las tablas `vehicles` y `vehicle_unavailabilities`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Máximo que admite `vehicles.daily_price NUMERIC(10, 2)`
pub fn max_daily_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: String,
    pub model: String,
    pub color: String,
    pub year: i32,
    pub license_plate: String,
    pub photo_urls: Vec<String>,
    pub daily_price: Decimal,
    pub rental_conditions: String,
    #[serde(rename = "class")]
    pub vehicle_class: Option<String>,
    pub drive: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub combination_mpg: Option<f64>,
    pub displacement: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos técnicos obtenidos de la API externa de vehículos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpecs {
    pub class: Option<String>,
    pub drive: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub combination_mpg: Option<f64>,
    pub displacement: Option<f64>,
}

impl VehicleSpecs {
    pub fn is_empty(&self) -> bool {
        *self == VehicleSpecs::default()
    }
}

impl Vehicle {
    /// Copia los datos técnicos sobre el vehículo
    pub fn apply_specs(&mut self, specs: VehicleSpecs) {
        self.vehicle_class = specs.class;
        self.drive = specs.drive;
        self.fuel_type = specs.fuel_type;
        self.transmission = specs.transmission;
        self.combination_mpg = specs.combination_mpg;
        self.displacement = specs.displacement;
    }
}

/// Ventana de no disponibilidad `[unavailable_from, unavailable_to]`, ambos extremos incluidos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VehicleUnavailability {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub rental_id: Option<Uuid>,
    pub unavailable_from: DateTime<Utc>,
    pub unavailable_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl VehicleUnavailability {
    pub fn new(
        vehicle_id: Uuid,
        rental_id: Option<Uuid>,
        unavailable_from: DateTime<Utc>,
        unavailable_to: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            rental_id,
            unavailable_from,
            unavailable_to,
            created_at: Utc::now(),
        }
    }
}
