use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::RentalController;
use crate::dto::rental_dto::{CreateRentalRequest, RentalResponse, UpdateRentalRequest};
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, require_role, AuthenticatedUser};
use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_rentals).post(create_rental))
        .route("/owner", get(list_owner_rentals))
        .route("/client", get(list_client_rentals))
        .route(
            "/:id",
            get(get_rental).put(update_rental).delete(delete_rental),
        )
        .route("/:id/confirm", put(confirm_rental))
        .route("/:id/cancel", put(cancel_rental))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRentalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RentalResponse>>), AppError> {
    let controller = RentalController::new(&state);
    let rental = controller.create(user.user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(rental, "Rental created successfully")),
    ))
}

async fn list_rentals(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RentalResponse>>>, AppError> {
    let controller = RentalController::new(&state);
    Ok(Json(ApiResponse::success(controller.list_all().await?)))
}

async fn list_owner_rentals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<RentalResponse>>>, AppError> {
    require_role(&user, UserRole::Owner)?;
    let controller = RentalController::new(&state);
    Ok(Json(ApiResponse::success(
        controller.list_by_owner(user.user_id).await?,
    )))
}

async fn list_client_rentals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<RentalResponse>>>, AppError> {
    require_role(&user, UserRole::Tenant)?;
    let controller = RentalController::new(&state);
    Ok(Json(ApiResponse::success(
        controller.list_by_client(user.user_id).await?,
    )))
}

async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(&state);
    Ok(Json(ApiResponse::success(controller.get_by_id(id).await?)))
}

async fn update_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRentalRequest>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(&state);
    let rental = controller.update(&user, id, request).await?;
    Ok(Json(ApiResponse::success_with_message(rental, "Rental updated successfully")))
}

async fn confirm_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(&state);
    let rental = controller.confirm(&user, id).await?;
    Ok(Json(ApiResponse::success_with_message(rental, "Rental confirmed")))
}

async fn cancel_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(&state);
    let rental = controller.cancel(&user, id).await?;
    Ok(Json(ApiResponse::success_with_message(rental, "Rental cancelled")))
}

async fn delete_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let controller = RentalController::new(&state);
    controller.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
