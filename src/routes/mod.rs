pub mod reservation_routes;
pub mod route_routes;

pub use reservation_routes::create_reservation_router;
pub use route_routes::create_route_router;
