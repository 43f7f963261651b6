//! Repositorios en memoria
//!
//! Mismo contrato que los repositorios PostgreSQL, sobre `HashMap`s
//! protegidos con `RwLock`.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RentalRepository, UserRepository, VehicleRepository, VehicleUnavailabilityRepository};
use crate::models::{Rental, User, Vehicle, VehicleUnavailability};
use crate::utils::errors::AppResult;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn update(&self, mut user: User) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Ok(None);
        }
        user.updated_at = Utc::now();
        users.insert(user.id, user.clone());
        Ok(Some(user))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryVehicleRepository {
    vehicles: Arc<RwLock<HashMap<Uuid, Vehicle>>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let mut all: Vec<Vehicle> = vehicles.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let mut owned: Vec<Vehicle> = vehicles
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles
            .values()
            .find(|v| v.license_plate == license_plate)
            .cloned())
    }

    async fn update(&self, mut vehicle: Vehicle) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        if !vehicles.contains_key(&vehicle.id) {
            return Ok(None);
        }
        vehicle.updated_at = Utc::now();
        vehicles.insert(vehicle.id, vehicle.clone());
        Ok(Some(vehicle))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut vehicles = self.vehicles.write().await;
        Ok(vehicles.remove(&id).is_some())
    }
}

/// Ventanas agrupadas por vehículo
#[derive(Default)]
pub struct InMemoryVehicleUnavailabilityRepository {
    windows: Arc<RwLock<HashMap<Uuid, Vec<VehicleUnavailability>>>>,
}

impl InMemoryVehicleUnavailabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleUnavailabilityRepository for InMemoryVehicleUnavailabilityRepository {
    async fn find_by_vehicle_id(&self, vehicle_id: Uuid) -> AppResult<Vec<VehicleUnavailability>> {
        let windows = self.windows.read().await;
        Ok(windows.get(&vehicle_id).cloned().unwrap_or_default())
    }

    async fn add_unavailability(
        &self,
        window: VehicleUnavailability,
    ) -> AppResult<Vec<VehicleUnavailability>> {
        let mut windows = self.windows.write().await;
        let list = windows.entry(window.vehicle_id).or_default();
        list.push(window);
        list.sort_by(|a, b| a.unavailable_from.cmp(&b.unavailable_from));
        Ok(list.clone())
    }

    async fn remove_unavailability(
        &self,
        vehicle_id: Uuid,
        window_id: Uuid,
    ) -> AppResult<Vec<VehicleUnavailability>> {
        let mut windows = self.windows.write().await;
        match windows.get_mut(&vehicle_id) {
            Some(list) => {
                list.retain(|w| w.id != window_id);
                Ok(list.clone())
            }
            None => Ok(Vec::new()),
        }
    }

    async fn remove_by_rental(&self, rental_id: Uuid) -> AppResult<u64> {
        let mut windows = self.windows.write().await;
        let mut removed = 0u64;
        for list in windows.values_mut() {
            let before = list.len();
            list.retain(|w| w.rental_id != Some(rental_id));
            removed += (before - list.len()) as u64;
        }
        Ok(removed)
    }

    async fn remove_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u64> {
        let mut windows = self.windows.write().await;
        Ok(windows
            .remove(&vehicle_id)
            .map(|list| list.len() as u64)
            .unwrap_or(0))
    }
}

#[derive(Default)]
pub struct InMemoryRentalRepository {
    rentals: Arc<RwLock<HashMap<Uuid, Rental>>>,
}

impl InMemoryRentalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_matching<F>(&self, predicate: F) -> Vec<Rental>
    where
        F: Fn(&Rental) -> bool,
    {
        let rentals = self.rentals.read().await;
        let mut found: Vec<Rental> = rentals.values().filter(|r| predicate(r)).cloned().collect();
        found.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        found
    }

    async fn delete_matching<F>(&self, predicate: F) -> u64
    where
        F: Fn(&Rental) -> bool,
    {
        let mut rentals = self.rentals.write().await;
        let before = rentals.len();
        rentals.retain(|_, r| !predicate(r));
        (before - rentals.len()) as u64
    }
}

#[async_trait]
impl RentalRepository for InMemoryRentalRepository {
    async fn create(&self, rental: Rental) -> AppResult<Rental> {
        let mut rentals = self.rentals.write().await;
        rentals.insert(rental.id, rental.clone());
        Ok(rental)
    }

    async fn find_all(&self) -> AppResult<Vec<Rental>> {
        Ok(self.find_matching(|_| true).await)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rental>> {
        let rentals = self.rentals.read().await;
        Ok(rentals.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Rental>> {
        Ok(self.find_matching(|r| r.owner_id == owner_id).await)
    }

    async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<Rental>> {
        Ok(self.find_matching(|r| r.client_id == client_id).await)
    }

    async fn update(&self, mut rental: Rental) -> AppResult<Option<Rental>> {
        let mut rentals = self.rentals.write().await;
        if !rentals.contains_key(&rental.id) {
            return Ok(None);
        }
        rental.updated_at = Utc::now();
        rentals.insert(rental.id, rental.clone());
        Ok(Some(rental))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rentals = self.rentals.write().await;
        Ok(rentals.remove(&id).is_some())
    }

    async fn delete_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<u64> {
        Ok(self.delete_matching(|r| r.vehicle_id == vehicle_id).await)
    }

    async fn delete_by_client(&self, client_id: Uuid) -> AppResult<u64> {
        Ok(self.delete_matching(|r| r.client_id == client_id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_user_lookup_by_email_and_username() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(User::new("ana".into(), "ana@mail.com".into(), "hash".into()))
            .await
            .unwrap();

        assert_eq!(repo.find_by_email("ana@mail.com").await.unwrap().unwrap().id, user.id);
        assert_eq!(repo.find_by_username("ana").await.unwrap().unwrap().id, user.id);
        assert!(repo.find_by_email("otro@mail.com").await.unwrap().is_none());
        assert!(repo.delete(user.id).await.unwrap());
        assert!(!repo.delete(user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("ana".into(), "ana@mail.com".into(), "hash".into());
        assert!(repo.update(user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailability_add_and_remove() {
        let repo = InMemoryVehicleUnavailabilityRepository::new();
        let vehicle_id = Uuid::new_v4();
        let rental_id = Uuid::new_v4();
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();

        let later = VehicleUnavailability::new(
            vehicle_id,
            None,
            start + Duration::days(10),
            start + Duration::days(12),
        );
        let booked =
            VehicleUnavailability::new(vehicle_id, Some(rental_id), start, start + Duration::days(2));

        repo.add_unavailability(later.clone()).await.unwrap();
        let list = repo.add_unavailability(booked.clone()).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, booked.id);

        // otras ventanas de otros vehículos no se ven
        assert!(repo.find_by_vehicle_id(Uuid::new_v4()).await.unwrap().is_empty());

        assert_eq!(repo.remove_by_rental(rental_id).await.unwrap(), 1);
        let list = repo.remove_unavailability(vehicle_id, later.id).await.unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_removing_from_unknown_vehicle_leaves_no_entry() {
        let repo = InMemoryVehicleUnavailabilityRepository::new();
        let unknown = Uuid::new_v4();

        let list = repo.remove_unavailability(unknown, Uuid::new_v4()).await.unwrap();
        assert!(list.is_empty());
        assert!(!repo.windows.read().await.contains_key(&unknown));
    }

    #[tokio::test]
    async fn test_remove_by_vehicle_drops_all_windows() {
        let repo = InMemoryVehicleUnavailabilityRepository::new();
        let vehicle_id = Uuid::new_v4();
        let start = Utc::now();
        for offset in [0, 5] {
            repo.add_unavailability(VehicleUnavailability::new(
                vehicle_id,
                None,
                start + Duration::days(offset),
                start + Duration::days(offset + 1),
            ))
            .await
            .unwrap();
        }

        assert_eq!(repo.remove_by_vehicle(vehicle_id).await.unwrap(), 2);
        assert!(repo.find_by_vehicle_id(vehicle_id).await.unwrap().is_empty());
        assert_eq!(repo.remove_by_vehicle(vehicle_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rentals_by_owner_and_client() {
        let repo = InMemoryRentalRepository::new();
        let (vehicle, client, owner) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let start = Utc::now();

        repo.create(Rental::new(
            vehicle,
            client,
            owner,
            start,
            start + Duration::days(1),
            Decimal::new(5000, 2),
        ))
        .await
        .unwrap();

        assert_eq!(repo.find_by_owner(owner).await.unwrap().len(), 1);
        assert_eq!(repo.find_by_client(client).await.unwrap().len(), 1);
        assert!(repo.find_by_client(owner).await.unwrap().is_empty());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        assert_eq!(repo.delete_by_vehicle(Uuid::new_v4()).await.unwrap(), 0);
        assert_eq!(repo.delete_by_client(client).await.unwrap(), 1);
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
