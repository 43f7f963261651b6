//! DTOs de requests y responses de la API

pub mod api_response;
pub mod auth_dto;
pub mod rental_dto;
pub mod user_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
