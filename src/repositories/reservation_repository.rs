use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::reservation::{Reservation, ReservationWithRoute};
use crate::repositories::ReservationStore;
use crate::services::seat_selection::SeatSelectionError;
use crate::utils::errors::{AppError, AppResult};

pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Asientos pedidos que ya aparecen en la base
    async fn taken_among(&self, route_id: Uuid, seats: &[i32]) -> AppResult<Vec<i32>> {
        let occupied = self.occupied_seats(route_id).await?;
        Ok(seats.iter().copied().filter(|s| occupied.contains(s)).collect())
    }
}

#[async_trait]
impl ReservationStore for PgReservationRepository {
    async fn occupied_seats(&self, route_id: Uuid) -> AppResult<BTreeSet<i32>> {
        let seats: Vec<(i32,)> = sqlx::query_as(
            "SELECT seat_number FROM reservations WHERE route_id = $1",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats.into_iter().map(|(seat,)| seat).collect())
    }

    async fn create_batch(&self, user_id: Uuid, route_id: Uuid, seats: &[i32]) -> AppResult<Vec<Reservation>> {
        let ids: Vec<Uuid> = seats.iter().map(|_| Uuid::new_v4()).collect();

        let mut tx = self.pool.begin().await?;

        // Insert-if-not-exists: la restricción UNIQUE (route_id, seat_number)
        // decide qué filas entran aunque otra request haya leído lo mismo
        let result = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (id, user_id, route_id, seat_number, created_at)
            SELECT seat.id, $1, $2, seat.seat_number, NOW()
            FROM UNNEST($3::uuid[], $4::int4[]) AS seat(id, seat_number)
            ON CONFLICT (route_id, seat_number) DO NOTHING
            RETURNING id, user_id, route_id, seat_number, created_at
            "#,
        )
        .bind(user_id)
        .bind(route_id)
        .bind(&ids[..])
        .bind(seats)
        .fetch_all(&mut *tx)
        .await;

        let inserted = match result {
            Ok(rows) => rows,
            Err(e) if AppError::is_unique_violation(&e) => {
                tx.rollback().await?;
                let taken = self.taken_among(route_id, seats).await?;
                return Err(SeatSelectionError::AlreadyReserved(taken).into());
            }
            Err(e) => return Err(AppError::from_insert_error(e, "Reservation")),
        };

        if inserted.len() != seats.len() {
            tx.rollback().await?;
            let granted: BTreeSet<i32> = inserted.iter().map(|r| r.seat_number).collect();
            let taken: Vec<i32> = seats.iter().copied().filter(|s| !granted.contains(s)).collect();
            tracing::info!(
                "⚠️ Conflicto de asientos en ruta {}: {:?} tomados por otra reserva",
                route_id,
                taken
            );
            return Err(SeatSelectionError::AlreadyReserved(taken).into());
        }

        tx.commit().await?;

        // Devolver en el orden pedido
        let order: HashMap<i32, usize> = seats.iter().enumerate().map(|(i, s)| (*s, i)).collect();
        let mut inserted = inserted;
        inserted.sort_by_key(|r| order.get(&r.seat_number).copied().unwrap_or(usize::MAX));

        Ok(inserted)
    }

    async fn list_for_user(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<ReservationWithRoute>> {
        let reservations = sqlx::query_as::<_, ReservationWithRoute>(
            r#"
            SELECT r.id, r.route_id, r.seat_number, r.created_at,
                   ro.origin, ro.destination, ro.travel_date, ro.departure_time, ro.price
            FROM reservations r
            JOIN routes ro ON ro.id = r.route_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC, r.seat_number
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }
}
