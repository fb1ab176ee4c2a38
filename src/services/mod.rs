//! Servicios de dominio
//!
//! Lógica sin estado que no depende del almacenamiento.

pub mod seat_selection;

pub use seat_selection::{available_seats, validate_seat_selection, SeatSelectionError};
