//! Controladores con la lógica de negocio

pub mod auth_controller;
pub mod rental_controller;
pub mod user_controller;
pub mod vehicle_controller;

pub use auth_controller::AuthController;
pub use rental_controller::RentalController;
pub use user_controller::UserController;
pub use vehicle_controller::VehicleController;
