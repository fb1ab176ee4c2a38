//! Modelo de Reservation
//!
//! Una reserva liga un usuario a un asiento de una ruta. Las reservas son
//! inmutables: no existe flujo de cancelación.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::route::City;

/// Capacidad fija de cada bus
pub const BUS_TOTAL_SEATS: i32 = 40;

/// Reservation principal - mapea a la tabla reservations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub route_id: Uuid,
    pub seat_number: i32,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(user_id: Uuid, route_id: Uuid, seat_number: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            route_id,
            seat_number,
            created_at: Utc::now(),
        }
    }
}

/// Reserva junto con los datos de su ruta, para "mis reservas"
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservationWithRoute {
    pub id: Uuid,
    pub route_id: Uuid,
    pub seat_number: i32,
    pub created_at: DateTime<Utc>,
    pub origin: City,
    pub destination: City,
    pub travel_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub price: Decimal,
}
