//! Vehicle Rental Marketplace API
//!
//! Backend de alquiler de vehículos entre particulares: usuarios con roles
//! (tenant, owner, admin), publicación de vehículos, reservas y control de
//! disponibilidad por vehículo.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use routes::create_router;
pub use state::AppState;
