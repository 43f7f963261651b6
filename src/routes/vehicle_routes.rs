use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{
    BlockDatesRequest, CreateVehicleRequest, UnavailabilityResponse, UpdateVehicleRequest,
    VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, require_role, AuthenticatedUser};
use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/myVehicles", get(list_my_vehicles))
        .route("/license/:license_plate", get(get_vehicle_by_license_plate))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route(
            "/:id/availability",
            get(get_vehicle_availability).post(block_vehicle_dates),
        )
        .route("/:id/availability/:window_id", delete(unblock_vehicle_dates))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    require_role(&user, UserRole::Owner)?;
    let controller = VehicleController::new(&state);
    let vehicle = controller.create(user.user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(vehicle, "Vehicle created successfully")),
    ))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(ApiResponse::success(controller.list_all().await?)))
}

async fn list_my_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, AppError> {
    require_role(&user, UserRole::Owner)?;
    let controller = VehicleController::new(&state);
    Ok(Json(ApiResponse::success(
        controller.list_by_owner(user.user_id).await?,
    )))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(ApiResponse::success(controller.get_by_id(id).await?)))
}

async fn get_vehicle_by_license_plate(
    State(state): State<AppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(ApiResponse::success(
        controller.get_by_license_plate(&license_plate).await?,
    )))
}

async fn get_vehicle_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<UnavailabilityResponse>>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(ApiResponse::success(controller.get_availability(id).await?)))
}

async fn block_vehicle_dates(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<BlockDatesRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<UnavailabilityResponse>>>), AppError> {
    require_role(&user, UserRole::Owner)?;
    let controller = VehicleController::new(&state);
    let windows = controller.block_dates(id, user.user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(windows, "Dates blocked")),
    ))
}

async fn unblock_vehicle_dates(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((id, window_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<Vec<UnavailabilityResponse>>>, AppError> {
    require_role(&user, UserRole::Owner)?;
    let controller = VehicleController::new(&state);
    let windows = controller.unblock_dates(id, user.user_id, window_id).await?;
    Ok(Json(ApiResponse::success_with_message(windows, "Dates unblocked")))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    require_role(&user, UserRole::Owner)?;
    let controller = VehicleController::new(&state);
    let vehicle = controller.update(id, user.user_id, request).await?;
    Ok(Json(ApiResponse::success_with_message(vehicle, "Vehicle updated successfully")))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_role(&user, UserRole::Owner)?;
    let controller = VehicleController::new(&state);
    controller.delete(id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
