//! Configuración de variables de entorno
//!
//! Este módulo carga la configuración del servicio desde el entorno
//! (con `.env` cargado previamente por `dotenvy`).

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_VEHICLE_DATA_API_URL: &str = "https://api.api-ninjas.com/v1/cars";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub database_url: Option<String>,
    pub vehicle_data_api_url: String,
    pub vehicle_data_api_key: Option<String>,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| anyhow!("JWT_SECRET must be set"))?;

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_var("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", 86_400)?,
            bcrypt_cost: parse_var("BCRYPT_COST", 10)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            database_url: non_empty_var("DATABASE_URL"),
            vehicle_data_api_url: env::var("VEHICLE_DATA_API_URL")
                .unwrap_or_else(|_| DEFAULT_VEHICLE_DATA_API_URL.to_string()),
            vehicle_data_api_key: non_empty_var("VEHICLE_DATA_API_KEY"),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Lista separada por comas, sin entradas vacías
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
