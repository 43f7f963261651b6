use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vehicle_rental::{
    config::{DatabaseConfig, EnvironmentConfig},
    create_router,
    database::DatabaseConnection,
    repositories::Repositories,
    services::ApiNinjasVehicleDataService,
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Vehicle Rental Marketplace API");
    info!("================================");

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Inicializar base de datos
    let repositories = match &config.database_url {
        Some(url) => {
            let db = match DatabaseConnection::new(&DatabaseConfig::new(url.clone())).await {
                Ok(db) => db,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            db.run_migrations()
                .await
                .context("Error aplicando migraciones")?;
            Repositories::postgres(db.pool().clone())
        }
        None => {
            warn!("⚠️ DATABASE_URL no configurada: usando almacenamiento en memoria");
            Repositories::in_memory()
        }
    };

    if config.vehicle_data_api_key.is_none() {
        warn!("⚠️ VEHICLE_DATA_API_KEY no configurada: los vehículos no se enriquecerán");
    }
    let vehicle_data = ApiNinjasVehicleDataService::new(
        config.vehicle_data_api_url.clone(),
        config.vehicle_data_api_key.clone(),
    )?;

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let state = AppState::new(config, repositories, Arc::new(vehicle_data));
    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("🔐 Auth:");
    info!("   POST /api/auth/signup | POST /api/auth/login");
    info!("   GET  /api/auth/test/{{admin,owner,tenant}}");
    info!("👤 Users:");
    info!("   GET|POST /api/users | GET|PUT|DELETE /api/users/:user_id");
    info!("   POST /api/users/:user_id/addOwnerRole | addAdminRole");
    info!("🚗 Vehicles:");
    info!("   GET|POST /api/vehicles | GET /api/vehicles/myVehicles");
    info!("   GET /api/vehicles/license/:license_plate");
    info!("   GET|POST /api/vehicles/:id/availability | DELETE /api/vehicles/:id/availability/:window_id");
    info!("   GET|PUT|DELETE /api/vehicles/:id");
    info!("📅 Rentals:");
    info!("   GET|POST /api/rentals | GET /api/rentals/owner | GET /api/rentals/client");
    info!("   GET|PUT|DELETE /api/rentals/:id | PUT /api/rentals/:id/confirm | PUT /api/rentals/:id/cancel");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor detenido");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Señal de apagado recibida, cerrando servidor...");
}
