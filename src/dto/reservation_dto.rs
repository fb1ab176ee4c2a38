use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::route_dto::empty_string_as_none;
use crate::models::reservation::{Reservation, ReservationWithRoute};
use crate::models::route::City;

// Request para reservar asientos: lista separada por comas, tal cual llega del selector
#[derive(Debug, Deserialize)]
pub struct ReserveSeatsRequest {
    #[serde(default)]
    pub seats: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MyReservationsQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub route_id: Uuid,
    pub user_id: Uuid,
    pub seat_number: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            route_id: reservation.route_id,
            user_id: reservation.user_id,
            seat_number: reservation.seat_number,
            created_at: reservation.created_at,
        }
    }
}

// Resultado de una reserva exitosa
#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationBatchResponse {
    pub route_id: Uuid,
    pub seats: Vec<i32>,
    pub reservations: Vec<ReservationResponse>,
}

// Reserva del usuario con su ruta
#[derive(Debug, Serialize, Deserialize)]
pub struct MyReservationResponse {
    pub id: Uuid,
    pub route_id: Uuid,
    pub seat_number: i32,
    pub origin: City,
    pub destination: City,
    pub travel_date: NaiveDate,
    pub departure_time: String,
    pub price: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReservationWithRoute> for MyReservationResponse {
    fn from(row: ReservationWithRoute) -> Self {
        Self {
            id: row.id,
            route_id: row.route_id,
            seat_number: row.seat_number,
            origin: row.origin,
            destination: row.destination,
            travel_date: row.travel_date,
            departure_time: row.departure_time.format("%H:%M").to_string(),
            price: format!("{:.2}", row.price),
            created_at: row.created_at,
        }
    }
}

// Mapa de asientos de una ruta
#[derive(Debug, Serialize, Deserialize)]
pub struct SeatMapResponse {
    pub route_id: Uuid,
    pub total_seats: i32,
    pub occupied: Vec<i32>,
    pub available: Vec<i32>,
}
