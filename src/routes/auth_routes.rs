use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::AuthController;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, LoginResponse, SignupRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::{
    admin_only_middleware, auth_middleware, owner_only_middleware, tenant_only_middleware,
    AuthenticatedUser,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de autenticación: registro, login y pruebas de rol
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let role_checks = Router::new()
        .route(
            "/test/admin",
            get(hello_role).route_layer(middleware::from_fn(admin_only_middleware)),
        )
        .route(
            "/test/owner",
            get(hello_role).route_layer(middleware::from_fn(owner_only_middleware)),
        )
        .route(
            "/test/tenant",
            get(hello_role).route_layer(middleware::from_fn(tenant_only_middleware)),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(role_checks)
}

async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let controller = AuthController::new(&state);
    let response = controller.signup(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            response,
            "User registered successfully",
        )),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn hello_role(Extension(user): Extension<AuthenticatedUser>) -> Json<ApiResponse<String>> {
    let roles: Vec<&str> = user.roles.iter().map(|r| r.as_str()).collect();
    Json(ApiResponse::success(format!(
        "Hello {}, your roles: {}",
        user.email,
        roles.join(", ")
    )))
}
