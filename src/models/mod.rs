//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL: usuarios, rutas y reservas.

pub mod reservation;
pub mod route;
pub mod user;

pub use reservation::{Reservation, ReservationWithRoute, BUS_TOTAL_SEATS};
pub use route::{City, NewRoute, Route, RouteFilters};
pub use user::{NewUser, User};
