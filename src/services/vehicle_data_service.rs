//! Cliente de la API externa de datos de vehículos (api-ninjas `/v1/cars`)
//!
//! Completa un vehículo con clase, tracción, combustible, transmisión,
//! consumo combinado y cilindrada a partir de marca, modelo y año.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::models::VehicleSpecs;
use crate::utils::errors::{AppError, AppResult};

/// Proveedor de datos técnicos de vehículos
#[async_trait]
pub trait VehicleDataProvider: Send + Sync {
    async fn fetch_specs(&self, make: &str, model: &str, year: i32) -> AppResult<VehicleSpecs>;
}

pub struct ApiNinjasVehicleDataService {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ApiNinjasVehicleDataService {
    pub fn new(base_url: String, api_key: Option<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl VehicleDataProvider for ApiNinjasVehicleDataService {
    async fn fetch_specs(&self, make: &str, model: &str, year: i32) -> AppResult<VehicleSpecs> {
        let Some(api_key) = self.api_key.as_deref() else {
            log::debug!("🔕 VEHICLE_DATA_API_KEY no configurada, se omite el enriquecimiento");
            return Ok(VehicleSpecs::default());
        };

        log::info!("🚙 Consultando datos técnicos: {} {} {}", make, model, year);

        let year = year.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .header("X-Api-Key", api_key)
            .query(&[("make", make), ("model", model), ("year", year.as_str())])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        let status = response.status();
        log::info!("📡 Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Vehicle data request failed with status {}: {}", status, error_text);
            return Err(AppError::ExternalApi(format!("Vehicle data request failed: {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse vehicle data: {}", e)))?;

        Ok(parse_specs(&body))
    }
}

/// Toma el primer resultado del array de la respuesta.
/// Los campos ausentes o con otro tipo (p. ej. texto "premium only") quedan en `None`.
pub fn parse_specs(body: &Value) -> VehicleSpecs {
    let Some(first) = body.as_array().and_then(|items| items.first()) else {
        return VehicleSpecs::default();
    };

    let text = |key: &str| first.get(key).and_then(Value::as_str).map(str::to_string);
    let number = |key: &str| first.get(key).and_then(Value::as_f64);

    VehicleSpecs {
        class: text("class"),
        drive: text("drive"),
        fuel_type: text("fuel_type"),
        transmission: text("transmission"),
        combination_mpg: number("combination_mpg"),
        displacement: number("displacement"),
    }
}
