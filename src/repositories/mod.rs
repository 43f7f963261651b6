//! Capa de acceso a datos
//!
//! Cada entidad expone un trait de repositorio con dos implementaciones:
//! PostgreSQL (`Pg*`) y memoria (`InMemory*`, usada en tests y en modo
//! desarrollo sin `DATABASE_URL`).

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Rental, User, Vehicle, VehicleUnavailability};
use crate::utils::errors::AppResult;

pub mod memory;
pub mod rental_repository;
pub mod user_repository;
pub mod vehicle_repository;
pub mod vehicle_unavailability_repository;

pub use memory::{
    InMemoryRentalRepository, InMemoryUserRepository, InMemoryVehicleRepository,
    InMemoryVehicleUnavailabilityRepository,
};
pub use rental_repository::PgRentalRepository;
pub use user_repository::PgUserRepository;
pub use vehicle_repository::PgVehicleRepository;
pub use vehicle_unavailability_repository::PgVehicleUnavailabilityRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    /// Reemplaza el usuario completo. `None` si no existe.
    async fn update(&self, user: User) -> AppResult<Option<User>>;
    /// `true` si el usuario existía
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: Vehicle) -> AppResult<Vehicle>;
    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Vehicle>>;
    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>>;
    async fn update(&self, vehicle: Vehicle) -> AppResult<Option<Vehicle>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Ventanas de no disponibilidad por vehículo
#[async_trait]
pub trait VehicleUnavailabilityRepository: Send + Sync {
    async fn find_by_vehicle_id(&self, vehicle_id: Uuid) -> AppResult<Vec<VehicleUnavailability>>;
    /// Agrega una ventana y devuelve la lista actualizada del vehículo
    async fn add_unavailability(
        &self,
        window: VehicleUnavailability,
    ) -> AppResult<Vec<VehicleUnavailability>>;
    /// Elimina una ventana por id y devuelve la lista actualizada del vehículo
    async fn remove_unavailability(
        &self,
        vehicle_id: Uuid,
        window_id: Uuid,
    ) -> AppResult<Vec<VehicleUnavailability>>;
    /// Elimina las ventanas asociadas a una reserva. Devuelve cuántas se eliminaron.
    async fn remove_by_rental(&self, rental_id: Uuid) -> AppResult<u64>;
    async fn remove_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u64>;
}

#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn create(&self, rental: Rental) -> AppResult<Rental>;
    async fn find_all(&self) -> AppResult<Vec<Rental>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rental>>;
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Rental>>;
    async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<Rental>>;
    async fn update(&self, rental: Rental) -> AppResult<Option<Rental>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn delete_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u64>;
    async fn delete_by_client(&self, client_id: Uuid) -> AppResult<u64>;
}

/// Conjunto de repositorios compartido por los controladores
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub unavailabilities: Arc<dyn VehicleUnavailabilityRepository>,
    pub rentals: Arc<dyn RentalRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            unavailabilities: Arc::new(PgVehicleUnavailabilityRepository::new(pool.clone())),
            rentals: Arc::new(PgRentalRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            vehicles: Arc::new(InMemoryVehicleRepository::new()),
            unavailabilities: Arc::new(InMemoryVehicleUnavailabilityRepository::new()),
            rentals: Arc::new(InMemoryRentalRepository::new()),
        }
    }

    /// Elimina un vehículo con sus reservas y ventanas.
    /// Ambos almacenamientos quedan igual, sin depender del `ON DELETE CASCADE`.
    pub async fn delete_vehicle(&self, vehicle_id: Uuid) -> AppResult<bool> {
        let windows = self.unavailabilities.remove_by_vehicle(vehicle_id).await?;
        let rentals = self.rentals.delete_by_vehicle(vehicle_id).await?;
        let deleted = self.vehicles.delete(vehicle_id).await?;
        if deleted {
            debug!(
                "🧹 Vehículo {}: {} reserva(s) y {} ventana(s) eliminadas",
                vehicle_id, rentals, windows
            );
        }
        Ok(deleted)
    }

    /// Elimina un usuario, sus vehículos y las reservas donde es cliente.
    /// Las ventanas de esas reservas se liberan.
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<bool> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Ok(false);
        }

        for vehicle in self.vehicles.find_by_owner(user_id).await? {
            self.delete_vehicle(vehicle.id).await?;
        }
        for rental in self.rentals.find_by_client(user_id).await? {
            self.unavailabilities.remove_by_rental(rental.id).await?;
        }
        self.rentals.delete_by_client(user_id).await?;

        self.users.delete(user_id).await
    }
}
