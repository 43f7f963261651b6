use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Rental, RentalStatus};

// Request para reservar un vehículo. El cliente es el usuario autenticado.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRentalRequest {
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_cost: Option<Decimal>,
}

// Actualización parcial de una reserva
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRentalRequest {
    pub status: Option<RentalStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub total_cost: Option<Decimal>,
}

impl UpdateRentalRequest {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.total_cost.is_none()
    }
}

// Response de reserva
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    pub owner_id: Uuid,
    pub status: RentalStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.id,
            vehicle_id: rental.vehicle_id,
            client_id: rental.client_id,
            owner_id: rental.owner_id,
            status: rental.status,
            start_date: rental.start_date,
            end_date: rental.end_date,
            total_cost: rental.total_cost,
            created_at: rental.created_at,
            updated_at: rental.updated_at,
        }
    }
}
