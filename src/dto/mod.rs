pub mod api_response;
pub mod reservation_dto;
pub mod route_dto;

pub use api_response::ApiResponse;
