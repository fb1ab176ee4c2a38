pub mod reservation_controller;
pub mod route_controller;

pub use reservation_controller::ReservationController;
pub use route_controller::RouteController;
