use std::sync::Arc;

use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::dto::reservation_dto::{
    MyReservationResponse, ReservationBatchResponse, ReservationResponse, SeatMapResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::reservation::BUS_TOTAL_SEATS;
use crate::repositories::{ReservationStore, RouteStore};
use crate::services::seat_selection::{available_seats, validate_seat_selection};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct ReservationController {
    routes: Arc<dyn RouteStore>,
    reservations: Arc<dyn ReservationStore>,
}

impl ReservationController {
    pub fn new(routes: Arc<dyn RouteStore>, reservations: Arc<dyn ReservationStore>) -> Self {
        Self { routes, reservations }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.routes.clone(), state.reservations.clone())
    }

    /// Reserva los asientos pedidos por `user` en la ruta.
    ///
    /// Lee los ocupados una vez, valida, y persiste el lote. Un asiento que
    /// otra request tomó entre la lectura y la escritura lo rechaza el
    /// almacenamiento con el mismo error de conflicto.
    pub async fn reserve(
        &self,
        user: &AuthenticatedUser,
        route_id: Uuid,
        raw_seats: &str,
    ) -> Result<ApiResponse<ReservationBatchResponse>, AppError> {
        let route = self
            .routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        let occupied = self.reservations.occupied_seats(route.id).await?;
        let seats = validate_seat_selection(raw_seats, &occupied)?;

        let created = self
            .reservations
            .create_batch(user.user_id, route.id, &seats)
            .await?;

        let seats_txt = seats
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            "🎫 {} reservó asientos [{}] en ruta {} ({} -> {})",
            user.username,
            seats_txt,
            route.id,
            route.origin,
            route.destination
        );

        let response = ReservationBatchResponse {
            route_id: route.id,
            seats,
            reservations: created.into_iter().map(ReservationResponse::from).collect(),
        };

        Ok(ApiResponse::success_with_message(
            response,
            format!("Reserved seats {} for the selected route", seats_txt),
        ))
    }

    pub async fn seat_map(&self, route_id: Uuid) -> Result<SeatMapResponse, AppError> {
        let route = self
            .routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        let occupied = self.reservations.occupied_seats(route.id).await?;

        Ok(SeatMapResponse {
            route_id: route.id,
            total_seats: BUS_TOTAL_SEATS,
            available: available_seats(&occupied),
            occupied: occupied.into_iter().collect(),
        })
    }

    pub async fn list_mine(
        &self,
        user: &AuthenticatedUser,
        limit: Option<i64>,
    ) -> Result<Vec<MyReservationResponse>, AppError> {
        if matches!(limit, Some(l) if l < 1) {
            return Err(AppError::BadRequest("limit must be at least 1".to_string()));
        }

        let reservations = self.reservations.list_for_user(user.user_id, limit).await?;
        Ok(reservations.into_iter().map(MyReservationResponse::from).collect())
    }
}
