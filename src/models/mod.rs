//! Modelos de datos
//!
//! Entidades persistidas del marketplace.

pub mod auth;
pub mod rental;
pub mod user;
pub mod vehicle;

pub use auth::JwtClaims;
pub use rental::{Rental, RentalStatus};
pub use user::{User, UserRole};
pub use vehicle::{Vehicle, VehicleSpecs, VehicleUnavailability};
