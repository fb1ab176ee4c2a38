use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::{ReservationController, RouteController};
use crate::dto::api_response::ApiResponse;
use crate::dto::reservation_dto::{ReservationBatchResponse, ReserveSeatsRequest, SeatMapResponse};
use crate::dto::route_dto::{RouteListQuery, RouteResponse};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/:id/reservations", post(reserve_seats))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(list_routes))
        .route("/:id", get(get_route))
        .route("/:id/seats", get(get_seat_map))
        .merge(protected)
}

async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<RouteListQuery>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let today = chrono::Local::now().date_naive();
    let controller = RouteController::from_state(&state);
    let response = controller.list_available(query.into(), today).await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::from_state(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn get_seat_map(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let controller = ReservationController::from_state(&state);
    let response = controller.seat_map(id).await?;
    Ok(Json(response))
}

async fn reserve_seats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReserveSeatsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationBatchResponse>>), AppError> {
    let controller = ReservationController::from_state(&state);
    let response = controller.reserve(&user, id, &request.seats).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
