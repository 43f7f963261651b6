use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::RentalRepository;
use crate::models::Rental;
use crate::utils::errors::AppResult;

pub struct PgRentalRepository {
    pool: PgPool,
}

impl PgRentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: &str, value: Uuid) -> AppResult<Vec<Rental>> {
        let rentals = sqlx::query_as::<_, Rental>(&format!(
            "SELECT * FROM rentals WHERE {} = $1 ORDER BY start_date DESC",
            column
        ))
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    async fn delete_where(&self, column: &str, value: Uuid) -> AppResult<u64> {
        let result = sqlx::query(&format!("DELETE FROM rentals WHERE {} = $1", column))
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RentalRepository for PgRentalRepository {
    async fn create(&self, rental: Rental) -> AppResult<Rental> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (
                id, vehicle_id, client_id, owner_id, status, start_date, end_date,
                total_cost, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(rental.id)
        .bind(rental.vehicle_id)
        .bind(rental.client_id)
        .bind(rental.owner_id)
        .bind(rental.status)
        .bind(rental.start_date)
        .bind(rental.end_date)
        .bind(rental.total_cost)
        .bind(rental.created_at)
        .bind(rental.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(rental)
    }

    async fn find_all(&self) -> AppResult<Vec<Rental>> {
        let rentals = sqlx::query_as::<_, Rental>("SELECT * FROM rentals ORDER BY start_date DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rentals)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rental)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Rental>> {
        self.find_where("owner_id", owner_id).await
    }

    async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<Rental>> {
        self.find_where("client_id", client_id).await
    }

    async fn update(&self, rental: Rental) -> AppResult<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET status = $2, start_date = $3, end_date = $4, total_cost = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(rental.id)
        .bind(rental.status)
        .bind(rental.start_date)
        .bind(rental.end_date)
        .bind(rental.total_cost)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u64> {
        self.delete_where("vehicle_id", vehicle_id).await
    }

    async fn delete_by_client(&self, client_id: Uuid) -> AppResult<u64> {
        self.delete_where("client_id", client_id).await
    }
}
