use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::UserController;
use crate::dto::auth_dto::{AuthResponse, SignupRequest};
use crate::dto::user_dto::{EditUserRequest, UserProfile};
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, require_role, AuthenticatedUser};
use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:user_id",
            get(get_user).put(edit_user).delete(delete_user),
        )
        .route("/:user_id/addOwnerRole", post(add_owner_role))
        .route("/:user_id/addAdminRole", post(add_admin_role))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, AppError> {
    require_role(&user, UserRole::Admin)?;
    let controller = UserController::new(&state);
    Ok(Json(ApiResponse::success(controller.list_users().await?)))
}

async fn create_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), AppError> {
    require_role(&user, UserRole::Admin)?;
    let controller = UserController::new(&state);
    let profile = controller.create_user(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(profile, "User created successfully")),
    ))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let controller = UserController::new(&state);
    Ok(Json(ApiResponse::success(controller.get_profile(user_id).await?)))
}

async fn edit_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<EditUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    require_role(&user, UserRole::Admin)?;
    let controller = UserController::new(&state);
    let profile = controller.edit_user(user_id, request).await?;
    Ok(Json(ApiResponse::success_with_message(profile, "User updated successfully")))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_role(&user, UserRole::Admin)?;
    let controller = UserController::new(&state);
    controller.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_owner_role(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    require_role(&user, UserRole::Tenant)?;
    let controller = UserController::new(&state);
    let response = controller.add_role(&user, user_id, UserRole::Owner).await?;
    Ok(Json(ApiResponse::success_with_message(response, "Owner role added")))
}

async fn add_admin_role(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    require_role(&user, UserRole::Admin)?;
    let controller = UserController::new(&state);
    let response = controller.add_role(&user, user_id, UserRole::Admin).await?;
    Ok(Json(ApiResponse::success_with_message(response, "Admin role added")))
}
