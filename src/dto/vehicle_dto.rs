use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::vehicle::max_daily_price;
use crate::models::{Vehicle, VehicleUnavailability};

// El precio diario debe ser positivo y caber en la columna
fn validate_daily_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO || *price > max_daily_price() {
        let mut error = ValidationError::new("daily_price_range");
        error.message = Some(
            format!("Daily price must be greater than 0 and at most {}", max_daily_price()).into(),
        );
        return Err(error);
    }
    Ok(())
}

// Request para crear un vehículo
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    #[validate(length(min = 1, max = 50))]
    pub color: String,
    #[validate(range(min = 1886, max = 2100))]
    pub year: i32,
    #[validate(length(min = 2, max = 20))]
    pub license_plate: String,
    pub photo_urls: Vec<String>,
    #[validate(custom = "validate_daily_price")]
    pub daily_price: Decimal,
    #[validate(length(min = 1))]
    pub rental_conditions: String,
}

// Request para actualizar un vehículo
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub color: Option<String>,
    #[validate(range(min = 1886, max = 2100))]
    pub year: Option<i32>,
    #[validate(length(min = 2, max = 20))]
    pub license_plate: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    #[validate(custom = "validate_daily_price")]
    pub daily_price: Option<Decimal>,
    #[validate(length(min = 1))]
    pub rental_conditions: Option<String>,
}

// Response de vehículo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleResponse {
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
    pub class: Option<String>,
    pub drive: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub combination_mpg: Option<f64>,
    pub displacement: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            owner_id: vehicle.owner_id,
            make: vehicle.make,
            model: vehicle.model,
            color: vehicle.color,
            year: vehicle.year,
            license_plate: vehicle.license_plate,
            photo_urls: vehicle.photo_urls,
            daily_price: vehicle.daily_price,
            rental_conditions: vehicle.rental_conditions,
            class: vehicle.vehicle_class,
            drive: vehicle.drive,
            fuel_type: vehicle.fuel_type,
            transmission: vehicle.transmission,
            combination_mpg: vehicle.combination_mpg,
            displacement: vehicle.displacement,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

// Request para bloquear fechas manualmente
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDatesRequest {
    pub unavailable_from: DateTime<Utc>,
    pub unavailable_to: DateTime<Utc>,
}

// Ventana de no disponibilidad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailabilityResponse {
    pub id: Uuid,
    pub rental_id: Option<Uuid>,
    pub unavailable_from: DateTime<Utc>,
    pub unavailable_to: DateTime<Utc>,
}

impl From<VehicleUnavailability> for UnavailabilityResponse {
    fn from(window: VehicleUnavailability) -> Self {
        Self {
            id: window.id,
            rental_id: window.rental_id,
            unavailable_from: window.unavailable_from,
            unavailable_to: window.unavailable_to,
        }
    }
}
