use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::VehicleRepository;
use crate::models::Vehicle;
use crate::utils::errors::AppResult;

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, owner_id, make, model, color, year, license_plate, photo_urls,
                daily_price, rental_conditions, vehicle_class, drive, fuel_type,
                transmission, combination_mpg, displacement, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.owner_id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(&vehicle.color)
        .bind(vehicle.year)
        .bind(&vehicle.license_plate)
        .bind(&vehicle.photo_urls)
        .bind(vehicle.daily_price)
        .bind(&vehicle.rental_conditions)
        .bind(&vehicle.vehicle_class)
        .bind(&vehicle.drive)
        .bind(&vehicle.fuel_type)
        .bind(&vehicle.transmission)
        .bind(vehicle.combination_mpg)
        .bind(vehicle.displacement)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE license_plate = $1")
                .bind(license_plate)
                .fetch_optional(&self.pool)
                .await?;

        Ok(vehicle)
    }

    async fn update(&self, vehicle: Vehicle) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET make = $2, model = $3, color = $4, year = $5, license_plate = $6,
                photo_urls = $7, daily_price = $8, rental_conditions = $9,
                vehicle_class = $10, drive = $11, fuel_type = $12, transmission = $13,
                combination_mpg = $14, displacement = $15, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(&vehicle.color)
        .bind(vehicle.year)
        .bind(&vehicle.license_plate)
        .bind(&vehicle.photo_urls)
        .bind(vehicle.daily_price)
        .bind(&vehicle.rental_conditions)
        .bind(&vehicle.vehicle_class)
        .bind(&vehicle.drive)
        .bind(&vehicle.fuel_type)
        .bind(&vehicle.transmission)
        .bind(vehicle.combination_mpg)
        .bind(vehicle.displacement)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
