//! Servicios de dominio y clientes externos

pub mod availability_service;
pub mod jwt_service;
pub mod password_service;
pub mod vehicle_data_service;

pub use jwt_service::JwtService;
pub use vehicle_data_service::{ApiNinjasVehicleDataService, VehicleDataProvider};
