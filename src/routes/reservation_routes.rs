use axum::{
    extract::{Query, State},
    middleware,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::ReservationController;
use crate::dto::reservation_dto::{MyReservationResponse, MyReservationsQuery};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/mine", get(list_my_reservations))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_my_reservations(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<MyReservationsQuery>,
) -> Result<Json<Vec<MyReservationResponse>>, AppError> {
    let controller = ReservationController::from_state(&state);
    let response = controller.list_mine(&user, query.limit).await?;
    Ok(Json(response))
}
