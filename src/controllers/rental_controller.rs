//! Reservas de vehículos
//!
//! `create` es el flujo central de reserva: busca el vehículo, comprueba
//! sus ventanas de no disponibilidad, crea la reserva en `pending` y
//! registra la nueva ventana. Las dos escrituras no van en una transacción:
//! si la segunda falla la reserva queda sin ventana, y dos solicitudes
//! simultáneas para el mismo rango pueden pasar ambas la comprobación.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::rental_dto::{CreateRentalRequest, RentalResponse, UpdateRentalRequest};
use crate::middleware::AuthenticatedUser;
use crate::models::rental::max_total_cost;
use crate::models::{Rental, RentalStatus, VehicleUnavailability};
use crate::repositories::{RentalRepository, VehicleRepository, VehicleUnavailabilityRepository};
use crate::services::availability_service;
use crate::state::AppState;
use crate::utils::errors::{
    bad_request_error, forbidden_error, not_found_error, AppError, AppResult,
};

const SECONDS_PER_DAY: i64 = 86_400;

pub struct RentalController {
    vehicles: Arc<dyn VehicleRepository>,
    unavailabilities: Arc<dyn VehicleUnavailabilityRepository>,
    rentals: Arc<dyn RentalRepository>,
}

impl RentalController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.repositories.vehicles.clone(),
            unavailabilities: state.repositories.unavailabilities.clone(),
            rentals: state.repositories.rentals.clone(),
        }
    }

    pub async fn create(
        &self,
        client_id: Uuid,
        request: CreateRentalRequest,
    ) -> AppResult<RentalResponse> {
        let CreateRentalRequest {
            vehicle_id,
            start_date,
            end_date,
            total_cost,
        } = request;

        if end_date < start_date {
            return Err(bad_request_error("End date must not be before start date"));
        }

        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let windows = self.unavailabilities.find_by_vehicle_id(vehicle.id).await?;
        if availability_service::is_unavailable(start_date, end_date, &windows) {
            warn!(
                "⛔ Vehículo {} no disponible entre {} y {}",
                vehicle.id, start_date, end_date
            );
            return Err(bad_request_error(
                "Vehicle is not available for the requested dates",
            ));
        }

        let total_cost = match total_cost {
            Some(cost) => ensure_total_cost(cost)?,
            None => rental_cost(vehicle.daily_price, start_date, end_date)?,
        };

        let rental = self
            .rentals
            .create(Rental::new(
                vehicle.id,
                client_id,
                vehicle.owner_id,
                start_date,
                end_date,
                total_cost,
            ))
            .await?;

        self.unavailabilities
            .add_unavailability(VehicleUnavailability::new(
                vehicle.id,
                Some(rental.id),
                start_date,
                end_date,
            ))
            .await?;

        info!(
            "📅 Reserva creada: {} (vehículo {}, cliente {})",
            rental.id, vehicle.id, client_id
        );
        Ok(rental.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<RentalResponse> {
        Ok(self.find_rental(id).await?.into())
    }

    pub async fn list_all(&self) -> AppResult<Vec<RentalResponse>> {
        let rentals = self.rentals.find_all().await?;
        non_empty(rentals, "No rentals found")
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<RentalResponse>> {
        let rentals = self.rentals.find_by_owner(owner_id).await?;
        non_empty(rentals, "No rentals found for this owner")
    }

    pub async fn list_by_client(&self, client_id: Uuid) -> AppResult<Vec<RentalResponse>> {
        let rentals = self.rentals.find_by_client(client_id).await?;
        non_empty(rentals, "No rentals found for this client")
    }

    /// Actualización parcial. No vuelve a comprobar la disponibilidad, pero la
    /// ventana de la reserva sigue a sus fechas y a su estado.
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateRentalRequest,
    ) -> AppResult<RentalResponse> {
        if request.is_empty() {
            return Err(bad_request_error("No fields to update"));
        }

        let mut rental = self.find_rental(id).await?;
        ensure_owner_or_admin(actor, &rental, "modify")?;

        if let Some(status) = request.status {
            rental.status = status;
        }
        if let Some(start_date) = request.start_date {
            rental.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            rental.end_date = end_date;
        }
        if let Some(total_cost) = request.total_cost {
            rental.total_cost = ensure_total_cost(total_cost)?;
        }
        if rental.end_date < rental.start_date {
            return Err(bad_request_error("End date must not be before start date"));
        }

        let rental = self.save(rental).await?;
        self.sync_window(&rental).await?;
        info!("✏️ Reserva actualizada: {}", rental.id);
        Ok(rental.into())
    }

    pub async fn confirm(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<RentalResponse> {
        let mut rental = self.find_rental(id).await?;
        ensure_owner_or_admin(actor, &rental, "confirm")?;

        if !rental.status.can_confirm() {
            return Err(AppError::BadRequest(format!(
                "Cannot confirm a rental with status {}",
                rental.status.as_str()
            )));
        }

        rental.status = RentalStatus::Confirmed;
        let rental = self.save(rental).await?;
        info!("✅ Reserva confirmada: {}", rental.id);
        Ok(rental.into())
    }

    /// Cancela la reserva y libera su ventana de no disponibilidad
    pub async fn cancel(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<RentalResponse> {
        let mut rental = self.find_rental(id).await?;
        if !actor.is_admin() && !rental.involves(actor.user_id) {
            return Err(forbidden_error("You are not part of this rental"));
        }

        if !rental.status.can_cancel() {
            return Err(AppError::BadRequest(format!(
                "Cannot cancel a rental with status {}",
                rental.status.as_str()
            )));
        }

        rental.status = RentalStatus::Cancelled;
        let rental = self.save(rental).await?;
        let released = self.unavailabilities.remove_by_rental(rental.id).await?;

        info!("🚫 Reserva cancelada: {} ({} ventana(s) liberada(s))", rental.id, released);
        Ok(rental.into())
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<()> {
        let rental = self.find_rental(id).await?;
        ensure_owner_or_admin(actor, &rental, "delete")?;

        self.unavailabilities.remove_by_rental(rental.id).await?;
        if !self.rentals.delete(rental.id).await? {
            return Err(not_found_error("Rental"));
        }

        info!("🗑️ Reserva eliminada: {}", id);
        Ok(())
    }

    async fn find_rental(&self, id: Uuid) -> AppResult<Rental> {
        self.rentals
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Rental"))
    }

    /// Reemplaza la ventana de la reserva; sin ventana si ya no ocupa el vehículo
    async fn sync_window(&self, rental: &Rental) -> AppResult<()> {
        self.unavailabilities.remove_by_rental(rental.id).await?;
        if rental.status.holds_vehicle() {
            self.unavailabilities
                .add_unavailability(VehicleUnavailability::new(
                    rental.vehicle_id,
                    Some(rental.id),
                    rental.start_date,
                    rental.end_date,
                ))
                .await?;
        }
        Ok(())
    }

    async fn save(&self, rental: Rental) -> AppResult<Rental> {
        self.rentals
            .update(rental)
            .await?
            .ok_or_else(|| not_found_error("Rental"))
    }
}

/// Precio diario por días iniciados, con un mínimo de un día
pub fn rental_cost(
    daily_price: Decimal,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Decimal> {
    let seconds = (end - start).num_seconds().max(0);
    let days = ((seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1);
    let cost = daily_price
        .checked_mul(Decimal::from(days))
        .ok_or_else(|| bad_request_error("Total cost is too large"))?;
    ensure_total_cost(cost)
}

fn ensure_total_cost(cost: Decimal) -> AppResult<Decimal> {
    if cost < Decimal::ZERO {
        return Err(bad_request_error("Total cost must not be negative"));
    }
    if cost > max_total_cost() {
        return Err(AppError::BadRequest(format!(
            "Total cost must not exceed {}",
            max_total_cost()
        )));
    }
    Ok(cost)
}

fn ensure_owner_or_admin(actor: &AuthenticatedUser, rental: &Rental, action: &str) -> AppResult<()> {
    if actor.is_admin() || rental.owner_id == actor.user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Only the vehicle owner can {} this rental",
            action
        )))
    }
}

fn non_empty(rentals: Vec<Rental>, message: &str) -> AppResult<Vec<RentalResponse>> {
    if rentals.is_empty() {
        return Err(AppError::NotFound(message.to_string()));
    }
    Ok(rentals.into_iter().map(RentalResponse::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserRole, Vehicle};
    use crate::test_support::{authenticated, insert_user, insert_vehicle, test_state};
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 10, 0, 0).unwrap()
    }

    fn booking(vehicle: &Vehicle, from: u32, to: u32) -> CreateRentalRequest {
        CreateRentalRequest {
            vehicle_id: vehicle.id,
            start_date: day(from),
            end_date: day(to),
            total_cost: None,
        }
    }

    async fn vehicle_windows(state: &AppState, vehicle_id: Uuid) -> Vec<VehicleUnavailability> {
        state
            .repositories
            .unavailabilities
            .find_by_vehicle_id(vehicle_id)
            .await
            .unwrap()
    }

    async fn setup() -> (AppState, Vehicle, Uuid) {
        let state = test_state();
        let owner = insert_user(&state, "olga", &[UserRole::Tenant, UserRole::Owner]).await;
        let vehicle = insert_vehicle(&state, owner.id, Decimal::new(4000, 2)).await;
        (state, vehicle, owner.id)
    }

    #[tokio::test]
    async fn test_booking_free_range_creates_pending_rental_and_one_window() {
        let (state, vehicle, owner_id) = setup().await;
        let controller = RentalController::new(&state);
        let client = Uuid::new_v4();

        let rental = controller.create(client, booking(&vehicle, 10, 13)).await.unwrap();

        assert_eq!(rental.status, RentalStatus::Pending);
        assert_eq!(rental.owner_id, owner_id);
        assert_eq!(rental.client_id, client);
        assert_eq!(rental.total_cost, Decimal::new(12000, 2));

        let windows = state
            .repositories
            .unavailabilities
            .find_by_vehicle_id(vehicle.id)
            .await
            .unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].rental_id, Some(rental.id));
        assert_eq!(windows[0].unavailable_from, day(10));
        assert_eq!(windows[0].unavailable_to, day(13));
    }

    #[tokio::test]
    async fn test_overlapping_booking_is_rejected_without_creating_rental() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);
        controller
            .create(Uuid::new_v4(), booking(&vehicle, 10, 15))
            .await
            .unwrap();

        let second_client = Uuid::new_v4();
        for (from, to) in [(12, 20), (5, 11), (1, 28), (15, 18), (5, 10)] {
            match controller
                .create(second_client, booking(&vehicle, from, to))
                .await
            {
                Err(AppError::BadRequest(msg)) => {
                    assert_eq!(msg, "Vehicle is not available for the requested dates")
                }
                other => panic!("expected conflict for {}-{}: {:?}", from, to, other.map(|r| r.id)),
            }
        }

        assert!(state
            .repositories
            .rentals
            .find_by_client(second_client)
            .await
            .unwrap()
            .is_empty());
        let windows = state
            .repositories
            .unavailabilities
            .find_by_vehicle_id(vehicle.id)
            .await
            .unwrap();
        assert_eq!(windows.len(), 1);
    }

    #[tokio::test]
    async fn test_non_overlapping_booking_appends_exactly_one_window() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);
        controller
            .create(Uuid::new_v4(), booking(&vehicle, 10, 15))
            .await
            .unwrap();

        controller
            .create(Uuid::new_v4(), booking(&vehicle, 16, 18))
            .await
            .unwrap();

        let windows = state
            .repositories
            .unavailabilities
            .find_by_vehicle_id(vehicle.id)
            .await
            .unwrap();
        assert_eq!(windows.len(), 2);
    }

    #[tokio::test]
    async fn test_booking_unknown_vehicle_is_not_found() {
        let state = test_state();
        let controller = RentalController::new(&state);
        let request = CreateRentalRequest {
            vehicle_id: Uuid::new_v4(),
            start_date: day(1),
            end_date: day(2),
            total_cost: None,
        };

        match controller.create(Uuid::new_v4(), request).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Vehicle not found"),
            other => panic!("unexpected result: {:?}", other.map(|r| r.id)),
        }
    }

    #[tokio::test]
    async fn test_inverted_dates_are_rejected() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);
        let result = controller
            .create(Uuid::new_v4(), booking(&vehicle, 15, 10))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_check_only_sees_recorded_windows() {
        // Reserva cuya ventana aún no se registró (segunda escritura pendiente
        // de otra solicitud): la comprobación no la ve y la reserva pasa.
        let (state, vehicle, owner_id) = setup().await;
        state
            .repositories
            .rentals
            .create(Rental::new(
                vehicle.id,
                Uuid::new_v4(),
                owner_id,
                day(10),
                day(12),
                Decimal::new(80, 0),
            ))
            .await
            .unwrap();

        let controller = RentalController::new(&state);
        assert!(controller
            .create(Uuid::new_v4(), booking(&vehicle, 10, 12))
            .await
            .is_ok());
        assert_eq!(state.repositories.rentals.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_explicit_total_cost_is_kept() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);
        let mut request = booking(&vehicle, 1, 3);
        request.total_cost = Some(Decimal::new(9999, 2));

        let rental = controller.create(Uuid::new_v4(), request).await.unwrap();
        assert_eq!(rental.total_cost, Decimal::new(9999, 2));
    }

    #[test]
    fn test_rental_cost_rounds_up_partial_days() {
        let price = Decimal::new(50, 0);
        assert_eq!(rental_cost(price, day(1), day(1)).unwrap(), Decimal::new(50, 0));
        assert_eq!(rental_cost(price, day(1), day(3)).unwrap(), Decimal::new(100, 0));
        assert_eq!(
            rental_cost(price, day(1), day(3) + Duration::hours(1)).unwrap(),
            Decimal::new(150, 0)
        );
    }

    #[test]
    fn test_rental_cost_overflow_is_a_bad_request() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        assert!(matches!(
            rental_cost(huge, day(1), day(11)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            rental_cost(Decimal::MAX, day(1), day(3)),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(
            rental_cost(max_total_cost(), day(1), day(1)).unwrap(),
            max_total_cost()
        );
        assert!(rental_cost(max_total_cost(), day(1), day(3)).is_err());
    }

    #[tokio::test]
    async fn test_booking_with_oversized_price_creates_nothing() {
        let state = test_state();
        let owner = Uuid::new_v4();
        let vehicle =
            insert_vehicle(&state, owner, Decimal::from_i128_with_scale(10_i128.pow(28), 0)).await;
        let controller = RentalController::new(&state);

        match controller.create(Uuid::new_v4(), booking(&vehicle, 1, 11)).await {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Total cost is too large"),
            other => panic!("unexpected result: {:?}", other.map(|r| r.id)),
        }
        assert!(state.repositories.rentals.find_all().await.unwrap().is_empty());
        assert!(state
            .repositories
            .unavailabilities
            .find_by_vehicle_id(vehicle.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_explicit_total_cost_must_fit_the_column() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);

        let mut request = booking(&vehicle, 1, 3);
        request.total_cost = Some(max_total_cost() + Decimal::new(1, 2));
        assert!(matches!(
            controller.create(Uuid::new_v4(), request).await,
            Err(AppError::BadRequest(_))
        ));

        let mut request = booking(&vehicle, 1, 3);
        request.total_cost = Some(Decimal::new(-1, 0));
        assert!(matches!(
            controller.create(Uuid::new_v4(), request).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(state.repositories.rentals.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_flow() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);
        let owner = state
            .repositories
            .users
            .find_by_id(vehicle.owner_id)
            .await
            .unwrap()
            .unwrap();
        let tenant = insert_user(&state, "tina", &[UserRole::Tenant]).await;
        let rental = controller
            .create(tenant.id, booking(&vehicle, 1, 3))
            .await
            .unwrap();

        assert!(matches!(
            controller.confirm(&authenticated(&tenant), rental.id).await,
            Err(AppError::Forbidden(_))
        ));

        let confirmed = controller
            .confirm(&authenticated(&owner), rental.id)
            .await
            .unwrap();
        assert_eq!(confirmed.status, RentalStatus::Confirmed);

        assert!(matches!(
            controller.confirm(&authenticated(&owner), rental.id).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_cancel_releases_window() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);
        let tenant = insert_user(&state, "tina", &[UserRole::Tenant]).await;
        let stranger = insert_user(&state, "sam", &[UserRole::Tenant]).await;
        let rental = controller
            .create(tenant.id, booking(&vehicle, 1, 3))
            .await
            .unwrap();

        assert!(matches!(
            controller.cancel(&authenticated(&stranger), rental.id).await,
            Err(AppError::Forbidden(_))
        ));

        let cancelled = controller
            .cancel(&authenticated(&tenant), rental.id)
            .await
            .unwrap();
        assert_eq!(cancelled.status, RentalStatus::Cancelled);
        assert!(state
            .repositories
            .unavailabilities
            .find_by_vehicle_id(vehicle.id)
            .await
            .unwrap()
            .is_empty());

        // el rango vuelve a estar libre
        assert!(controller
            .create(stranger.id, booking(&vehicle, 1, 3))
            .await
            .is_ok());

        assert!(matches!(
            controller.cancel(&authenticated(&tenant), rental.id).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_listings_report_not_found_when_empty() {
        let (state, vehicle, owner_id) = setup().await;
        let controller = RentalController::new(&state);
        let client = Uuid::new_v4();

        match controller.list_all().await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No rentals found"),
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
        match controller.list_by_owner(owner_id).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No rentals found for this owner"),
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
        match controller.list_by_client(client).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No rentals found for this client"),
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }

        controller.create(client, booking(&vehicle, 1, 2)).await.unwrap();
        assert_eq!(controller.list_all().await.unwrap().len(), 1);
        assert_eq!(controller.list_by_owner(owner_id).await.unwrap().len(), 1);
        assert_eq!(controller.list_by_client(client).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);
        let owner = state
            .repositories
            .users
            .find_by_id(vehicle.owner_id)
            .await
            .unwrap()
            .unwrap();
        let rental = controller
            .create(Uuid::new_v4(), booking(&vehicle, 1, 3))
            .await
            .unwrap();

        let updated = controller
            .update(
                &authenticated(&owner),
                rental.id,
                UpdateRentalRequest {
                    total_cost: Some(Decimal::new(75, 0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.total_cost, Decimal::new(75, 0));

        assert!(matches!(
            controller
                .update(&authenticated(&owner), rental.id, UpdateRentalRequest::default())
                .await,
            Err(AppError::BadRequest(_))
        ));

        controller.delete(&authenticated(&owner), rental.id).await.unwrap();
        assert!(matches!(
            controller.get_by_id(rental.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(state
            .repositories
            .unavailabilities
            .find_by_vehicle_id(vehicle.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_window_in_step() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);
        let owner = state
            .repositories
            .users
            .find_by_id(vehicle.owner_id)
            .await
            .unwrap()
            .unwrap();
        let actor = authenticated(&owner);
        let rental = controller
            .create(Uuid::new_v4(), booking(&vehicle, 1, 3))
            .await
            .unwrap();

        controller
            .update(
                &actor,
                rental.id,
                UpdateRentalRequest {
                    start_date: Some(day(5)),
                    end_date: Some(day(8)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let current = vehicle_windows(&state, vehicle.id).await;
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].rental_id, Some(rental.id));
        assert_eq!(current[0].unavailable_from, day(5));
        assert_eq!(current[0].unavailable_to, day(8));

        let status = |status| UpdateRentalRequest {
            status: Some(status),
            ..Default::default()
        };

        controller
            .update(&actor, rental.id, status(RentalStatus::Cancelled))
            .await
            .unwrap();
        assert!(vehicle_windows(&state, vehicle.id).await.is_empty());

        controller
            .update(&actor, rental.id, status(RentalStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(vehicle_windows(&state, vehicle.id).await.len(), 1);

        // El rango anterior queda libre
        assert!(controller
            .create(Uuid::new_v4(), booking(&vehicle, 1, 3))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_oversized_total_cost() {
        let (state, vehicle, _) = setup().await;
        let controller = RentalController::new(&state);
        let owner = state
            .repositories
            .users
            .find_by_id(vehicle.owner_id)
            .await
            .unwrap()
            .unwrap();
        let rental = controller
            .create(Uuid::new_v4(), booking(&vehicle, 1, 3))
            .await
            .unwrap();

        let result = controller
            .update(
                &authenticated(&owner),
                rental.id,
                UpdateRentalRequest {
                    total_cost: Some(Decimal::MAX),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(
            controller.get_by_id(rental.id).await.unwrap().total_cost,
            rental.total_cost
        );
    }
}
