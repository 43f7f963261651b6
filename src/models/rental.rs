//! Modelo de Rental
//!
//! Reservas de vehículos. Mapea a la tabla rentals y al ENUM rental_status.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Máximo que admite `rentals.total_cost NUMERIC(12, 2)`
pub fn max_total_cost() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Estado de la reserva - mapea al ENUM rental_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Expired,
    Extended,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Confirmed => "confirmed",
            RentalStatus::Completed => "completed",
            RentalStatus::Cancelled => "cancelled",
            RentalStatus::Expired => "expired",
            RentalStatus::Extended => "extended",
        }
    }

    pub fn can_confirm(&self) -> bool {
        matches!(self, RentalStatus::Pending)
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self, RentalStatus::Pending | RentalStatus::Confirmed)
    }

    /// Una reserva cancelada o expirada ya no ocupa el vehículo
    pub fn holds_vehicle(&self) -> bool {
        !matches!(self, RentalStatus::Cancelled | RentalStatus::Expired)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
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

impl Rental {
    /// Nueva reserva en estado `pending`
    pub fn new(
        vehicle_id: Uuid,
        client_id: Uuid,
        owner_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        total_cost: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            client_id,
            owner_id,
            status: RentalStatus::Pending,
            start_date,
            end_date,
            total_cost,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.client_id == user_id || self.owner_id == user_id
    }
}
