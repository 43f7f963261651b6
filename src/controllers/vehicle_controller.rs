use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    BlockDatesRequest, CreateVehicleRequest, UnavailabilityResponse, UpdateVehicleRequest,
    VehicleResponse,
};
use crate::models::{Vehicle, VehicleSpecs, VehicleUnavailability};
use crate::repositories::{Repositories, VehicleRepository, VehicleUnavailabilityRepository};
use crate::services::{availability_service, VehicleDataProvider};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, forbidden_error, not_found_error, AppResult};

pub struct VehicleController {
    vehicles: Arc<dyn VehicleRepository>,
    unavailabilities: Arc<dyn VehicleUnavailabilityRepository>,
    repositories: Repositories,
    vehicle_data: Arc<dyn VehicleDataProvider>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.repositories.vehicles.clone(),
            unavailabilities: state.repositories.unavailabilities.clone(),
            repositories: state.repositories.clone(),
            vehicle_data: state.vehicle_data.clone(),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateVehicleRequest,
    ) -> AppResult<VehicleResponse> {
        request.validate()?;

        let license_plate = request.license_plate.trim().to_string();
        if self
            .vehicles
            .find_by_license_plate(&license_plate)
            .await?
            .is_some()
        {
            return Err(bad_request_error("Vehicle with this license plate already exists"));
        }

        let now = Utc::now();
        let mut vehicle = Vehicle {
            id: Uuid::new_v4(),
            owner_id,
            make: request.make.trim().to_string(),
            model: request.model.trim().to_string(),
            color: request.color.trim().to_string(),
            year: request.year,
            license_plate,
            photo_urls: request.photo_urls,
            daily_price: request.daily_price,
            rental_conditions: request.rental_conditions,
            vehicle_class: None,
            drive: None,
            fuel_type: None,
            transmission: None,
            combination_mpg: None,
            displacement: None,
            created_at: now,
            updated_at: now,
        };

        // El enriquecimiento es opcional: un fallo no impide publicar el vehículo
        let specs = match self
            .vehicle_data
            .fetch_specs(&vehicle.make, &vehicle.model, vehicle.year)
            .await
        {
            Ok(specs) => specs,
            Err(e) => {
                warn!("⚠️ No se pudieron obtener datos técnicos: {}", e);
                VehicleSpecs::default()
            }
        };
        vehicle.apply_specs(specs);

        let vehicle = self.vehicles.create(vehicle).await?;
        info!("🚗 Vehículo creado: {} ({})", vehicle.license_plate, vehicle.id);

        Ok(vehicle.into())
    }

    pub async fn list_all(&self) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.vehicles.find_all().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.vehicles.find_by_owner(owner_id).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<VehicleResponse> {
        Ok(self.find_vehicle(id).await?.into())
    }

    pub async fn get_by_license_plate(&self, license_plate: &str) -> AppResult<VehicleResponse> {
        let vehicle = self
            .vehicles
            .find_by_license_plate(license_plate.trim())
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;
        Ok(vehicle.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<VehicleResponse> {
        request.validate()?;

        let mut vehicle = self.find_owned_vehicle(id, owner_id).await?;

        if let Some(license_plate) = request.license_plate {
            let license_plate = license_plate.trim().to_string();
            if license_plate != vehicle.license_plate {
                if let Some(existing) = self.vehicles.find_by_license_plate(&license_plate).await? {
                    if existing.id != vehicle.id {
                        return Err(bad_request_error(
                            "Vehicle with this license plate already exists",
                        ));
                    }
                }
                vehicle.license_plate = license_plate;
            }
        }
        if let Some(daily_price) = request.daily_price {
            vehicle.daily_price = daily_price;
        }
        if let Some(make) = request.make {
            vehicle.make = make.trim().to_string();
        }
        if let Some(model) = request.model {
            vehicle.model = model.trim().to_string();
        }
        if let Some(color) = request.color {
            vehicle.color = color.trim().to_string();
        }
        if let Some(year) = request.year {
            vehicle.year = year;
        }
        if let Some(photo_urls) = request.photo_urls {
            vehicle.photo_urls = photo_urls;
        }
        if let Some(rental_conditions) = request.rental_conditions {
            vehicle.rental_conditions = rental_conditions;
        }

        let vehicle = self
            .vehicles
            .update(vehicle)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        info!("✏️ Vehículo actualizado: {}", vehicle.id);
        Ok(vehicle.into())
    }

    /// Elimina el vehículo junto con sus reservas y ventanas
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        self.find_owned_vehicle(id, owner_id).await?;

        if !self.repositories.delete_vehicle(id).await? {
            return Err(not_found_error("Vehicle"));
        }
        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }

    /// Ventanas de no disponibilidad del vehículo
    pub async fn get_availability(&self, id: Uuid) -> AppResult<Vec<UnavailabilityResponse>> {
        let vehicle = self.find_vehicle(id).await?;
        let windows = self.unavailabilities.find_by_vehicle_id(vehicle.id).await?;
        Ok(windows.into_iter().map(UnavailabilityResponse::from).collect())
    }

    /// Bloqueo manual de fechas por parte del owner
    pub async fn block_dates(
        &self,
        id: Uuid,
        owner_id: Uuid,
        request: BlockDatesRequest,
    ) -> AppResult<Vec<UnavailabilityResponse>> {
        if request.unavailable_to < request.unavailable_from {
            return Err(bad_request_error("End date must not be before start date"));
        }

        let vehicle = self.find_owned_vehicle(id, owner_id).await?;
        let windows = self.unavailabilities.find_by_vehicle_id(vehicle.id).await?;
        if availability_service::is_unavailable(
            request.unavailable_from,
            request.unavailable_to,
            &windows,
        ) {
            return Err(bad_request_error(
                "Vehicle is already unavailable for the requested dates",
            ));
        }

        let windows = self
            .unavailabilities
            .add_unavailability(VehicleUnavailability::new(
                vehicle.id,
                None,
                request.unavailable_from,
                request.unavailable_to,
            ))
            .await?;

        info!(
            "🔒 Fechas bloqueadas en {}: {} - {}",
            vehicle.id, request.unavailable_from, request.unavailable_to
        );
        Ok(windows.into_iter().map(UnavailabilityResponse::from).collect())
    }

    /// Quita un bloqueo manual. Las ventanas de reservas se liberan cancelando la reserva.
    pub async fn unblock_dates(
        &self,
        id: Uuid,
        owner_id: Uuid,
        window_id: Uuid,
    ) -> AppResult<Vec<UnavailabilityResponse>> {
        let vehicle = self.find_owned_vehicle(id, owner_id).await?;
        let windows = self.unavailabilities.find_by_vehicle_id(vehicle.id).await?;

        let window = windows
            .iter()
            .find(|w| w.id == window_id)
            .ok_or_else(|| not_found_error("Unavailability window"))?;
        if window.rental_id.is_some() {
            return Err(bad_request_error(
                "This window belongs to a rental; cancel the rental instead",
            ));
        }

        let windows = self
            .unavailabilities
            .remove_unavailability(vehicle.id, window_id)
            .await?;

        info!("🔓 Bloqueo {} eliminado del vehículo {}", window_id, vehicle.id);
        Ok(windows.into_iter().map(UnavailabilityResponse::from).collect())
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))
    }

    async fn find_owned_vehicle(&self, id: Uuid, owner_id: Uuid) -> AppResult<Vehicle> {
        let vehicle = self.find_vehicle(id).await?;
        if vehicle.owner_id != owner_id {
            return Err(forbidden_error("You are not the owner of this vehicle"));
        }
        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::RentalController;
    use crate::dto::rental_dto::CreateRentalRequest;
    use crate::test_support::{insert_vehicle, test_state, test_state_with, StubVehicleData};
    use crate::utils::errors::AppError;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, d, 12, 0, 0).unwrap()
    }

    fn create_request(license_plate: &str) -> CreateVehicleRequest {
        CreateVehicleRequest {
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            color: "Blue".to_string(),
            year: 2020,
            license_plate: license_plate.to_string(),
            photo_urls: vec!["https://img.example.com/1.jpg".to_string()],
            daily_price: Decimal::new(4500, 2),
            rental_conditions: "No smoking".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_merges_vehicle_specs() {
        let provider = Arc::new(StubVehicleData::returning(VehicleSpecs {
            class: Some("compact car".to_string()),
            drive: Some("fwd".to_string()),
            fuel_type: Some("gas".to_string()),
            transmission: Some("a".to_string()),
            combination_mpg: Some(32.0),
            displacement: Some(1.8),
        }));
        let state = test_state_with(provider.clone());
        let controller = VehicleController::new(&state);

        let vehicle = controller
            .create(Uuid::new_v4(), create_request("ABC-123"))
            .await
            .unwrap();

        assert_eq!(provider.calls(), 1);
        assert_eq!(vehicle.class.as_deref(), Some("compact car"));
        assert_eq!(vehicle.combination_mpg, Some(32.0));
        assert_eq!(vehicle.license_plate, "ABC-123");
    }

    #[tokio::test]
    async fn test_create_ignores_enrichment_failure() {
        let state = test_state_with(Arc::new(StubVehicleData::failing()));
        let controller = VehicleController::new(&state);

        let vehicle = controller
            .create(Uuid::new_v4(), create_request("ABC-123"))
            .await
            .unwrap();

        assert!(vehicle.class.is_none());
        assert!(vehicle.displacement.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_plate_and_bad_price() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        let owner = Uuid::new_v4();
        controller.create(owner, create_request("ABC-123")).await.unwrap();

        match controller.create(owner, create_request(" ABC-123 ")).await {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(msg, "Vehicle with this license plate already exists")
            }
            other => panic!("unexpected result: {:?}", other.map(|v| v.id)),
        }

        let mut free = create_request("XYZ-999");
        free.daily_price = Decimal::ZERO;
        assert!(matches!(
            controller.create(owner, free).await,
            Err(AppError::Validation(_))
        ));

        let mut huge = create_request("XYZ-999");
        huge.daily_price = Decimal::new(100_000_000, 0);
        assert!(matches!(
            controller.create(owner, huge).await,
            Err(AppError::Validation(_))
        ));

        let mut invalid = create_request("XYZ-999");
        invalid.year = 1700;
        assert!(matches!(
            controller.create(owner, invalid).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_only_owner_can_update_or_delete() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        let owner = Uuid::new_v4();
        let vehicle = insert_vehicle(&state, owner, Decimal::new(30, 0)).await;

        let update = UpdateVehicleRequest {
            color: Some("Red".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            controller.update(vehicle.id, Uuid::new_v4(), update.clone()).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            controller.delete(vehicle.id, Uuid::new_v4()).await,
            Err(AppError::Forbidden(_))
        ));

        let updated = controller.update(vehicle.id, owner, update).await.unwrap();
        assert_eq!(updated.color, "Red");
        assert_eq!(updated.make, "Toyota");

        controller.delete(vehicle.id, owner).await.unwrap();
        assert!(matches!(
            controller.get_by_id(vehicle.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_plate_of_other_vehicle() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        let owner = Uuid::new_v4();
        let first = insert_vehicle(&state, owner, Decimal::new(30, 0)).await;
        let second = insert_vehicle(&state, owner, Decimal::new(30, 0)).await;

        let result = controller
            .update(
                second.id,
                owner,
                UpdateVehicleRequest {
                    license_plate: Some(first.license_plate.clone()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_lookup_by_plate_and_owner() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        let owner = Uuid::new_v4();
        let vehicle = insert_vehicle(&state, owner, Decimal::new(30, 0)).await;
        insert_vehicle(&state, Uuid::new_v4(), Decimal::new(30, 0)).await;

        let found = controller
            .get_by_license_plate(&vehicle.license_plate)
            .await
            .unwrap();
        assert_eq!(found.id, vehicle.id);
        assert!(matches!(
            controller.get_by_license_plate("NOPE-1").await,
            Err(AppError::NotFound(_))
        ));

        assert_eq!(controller.list_by_owner(owner).await.unwrap().len(), 1);
        assert_eq!(controller.list_all().await.unwrap().len(), 2);
        assert!(controller.get_availability(vehicle.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_price_outside_column_range() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        let owner = Uuid::new_v4();
        let vehicle = insert_vehicle(&state, owner, Decimal::new(30, 0)).await;

        let result = controller
            .update(
                vehicle.id,
                owner,
                UpdateVehicleRequest {
                    daily_price: Some(Decimal::new(1_000_000_000, 0)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(
            controller.get_by_id(vehicle.id).await.unwrap().daily_price,
            Decimal::new(30, 0)
        );
    }

    #[tokio::test]
    async fn test_delete_removes_rentals_and_windows() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        let rentals = RentalController::new(&state);
        let owner = Uuid::new_v4();
        let vehicle = insert_vehicle(&state, owner, Decimal::new(30, 0)).await;
        let other = insert_vehicle(&state, owner, Decimal::new(30, 0)).await;

        for target in [&vehicle, &other] {
            rentals
                .create(
                    Uuid::new_v4(),
                    CreateRentalRequest {
                        vehicle_id: target.id,
                        start_date: day(1),
                        end_date: day(3),
                        total_cost: None,
                    },
                )
                .await
                .unwrap();
        }

        controller.delete(vehicle.id, owner).await.unwrap();

        let left = state.repositories.rentals.find_all().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].vehicle_id, other.id);
        assert!(state
            .repositories
            .unavailabilities
            .find_by_vehicle_id(vehicle.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            state
                .repositories
                .unavailabilities
                .find_by_vehicle_id(other.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_block_and_unblock_dates() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        let owner = Uuid::new_v4();
        let vehicle = insert_vehicle(&state, owner, Decimal::new(30, 0)).await;

        let block = |from, to| BlockDatesRequest {
            unavailable_from: day(from),
            unavailable_to: day(to),
        };

        assert!(matches!(
            controller.block_dates(vehicle.id, Uuid::new_v4(), block(1, 2)).await,
            Err(AppError::Forbidden(_))
        ));

        let windows = controller
            .block_dates(vehicle.id, owner, block(10, 12))
            .await
            .unwrap();
        assert_eq!(windows.len(), 1);
        assert!(windows[0].rental_id.is_none());

        assert!(matches!(
            controller.block_dates(vehicle.id, owner, block(12, 14)).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            controller.block_dates(vehicle.id, owner, block(5, 4)).await,
            Err(AppError::BadRequest(_))
        ));

        assert!(matches!(
            controller
                .unblock_dates(vehicle.id, owner, Uuid::new_v4())
                .await,
            Err(AppError::NotFound(_))
        ));
        let windows = controller
            .unblock_dates(vehicle.id, owner, windows[0].id)
            .await
            .unwrap();
        assert!(windows.is_empty());
    }

    #[tokio::test]
    async fn test_rental_window_cannot_be_unblocked() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        let owner = Uuid::new_v4();
        let vehicle = insert_vehicle(&state, owner, Decimal::new(30, 0)).await;

        RentalController::new(&state)
            .create(
                Uuid::new_v4(),
                CreateRentalRequest {
                    vehicle_id: vehicle.id,
                    start_date: day(1),
                    end_date: day(2),
                    total_cost: None,
                },
            )
            .await
            .unwrap();

        let windows = controller.get_availability(vehicle.id).await.unwrap();
        assert!(matches!(
            controller
                .unblock_dates(vehicle.id, owner, windows[0].id)
                .await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(controller.get_availability(vehicle.id).await.unwrap().len(), 1);
    }
}
