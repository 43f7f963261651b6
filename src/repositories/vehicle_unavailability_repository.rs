use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::VehicleUnavailabilityRepository;
use crate::models::VehicleUnavailability;
use crate::utils::errors::AppResult;

pub struct PgVehicleUnavailabilityRepository {
    pool: PgPool,
}

impl PgVehicleUnavailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleUnavailabilityRepository for PgVehicleUnavailabilityRepository {
    async fn find_by_vehicle_id(&self, vehicle_id: Uuid) -> AppResult<Vec<VehicleUnavailability>> {
        let windows = sqlx::query_as::<_, VehicleUnavailability>(
            r#"
            SELECT id, vehicle_id, rental_id, unavailable_from, unavailable_to, created_at
            FROM vehicle_unavailabilities
            WHERE vehicle_id = $1
            ORDER BY unavailable_from
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(windows)
    }

    async fn add_unavailability(
        &self,
        window: VehicleUnavailability,
    ) -> AppResult<Vec<VehicleUnavailability>> {
        sqlx::query(
            r#"
            INSERT INTO vehicle_unavailabilities
                (id, vehicle_id, rental_id, unavailable_from, unavailable_to, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(window.id)
        .bind(window.vehicle_id)
        .bind(window.rental_id)
        .bind(window.unavailable_from)
        .bind(window.unavailable_to)
        .bind(window.created_at)
        .execute(&self.pool)
        .await?;

        self.find_by_vehicle_id(window.vehicle_id).await
    }

    async fn remove_unavailability(
        &self,
        vehicle_id: Uuid,
        window_id: Uuid,
    ) -> AppResult<Vec<VehicleUnavailability>> {
        sqlx::query("DELETE FROM vehicle_unavailabilities WHERE id = $1 AND vehicle_id = $2")
            .bind(window_id)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        self.find_by_vehicle_id(vehicle_id).await
    }

    async fn remove_by_rental(&self, rental_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM vehicle_unavailabilities WHERE rental_id = $1")
            .bind(rental_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn remove_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM vehicle_unavailabilities WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
