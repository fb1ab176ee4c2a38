//! Almacenamiento en memoria
//!
//! Implementa los tres stores sobre un único mutex. La inserción de reservas
//! revisa y escribe bajo el mismo lock, igual que la restricción
//! UNIQUE (route_id, seat_number) de la base.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::reservation::{Reservation, ReservationWithRoute};
use crate::models::route::{Route, RouteFilters};
use crate::models::user::User;
use crate::repositories::{ReservationStore, RouteStore, UserStore};
use crate::services::seat_selection::SeatSelectionError;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    routes: HashMap<Uuid, Route>,
    reservations: Vec<Reservation>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total de reservas guardadas
    pub async fn reservation_count(&self) -> usize {
        self.tables.lock().await.reservations.len()
    }
}

#[async_trait]
impl RouteStore for InMemoryStore {
    async fn create(&self, route: &Route) -> AppResult<Route> {
        let mut tables = self.tables.lock().await;
        if tables.routes.contains_key(&route.id) {
            return Err(conflict_error("Route", "id", &route.id.to_string()));
        }
        tables.routes.insert(route.id, route.clone());
        Ok(route.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        Ok(self.tables.lock().await.routes.get(&id).cloned())
    }

    async fn list_available(&self, filters: &RouteFilters, today: NaiveDate) -> AppResult<Vec<Route>> {
        let tables = self.tables.lock().await;
        let mut routes: Vec<Route> = tables
            .routes
            .values()
            .filter(|route| filters.matches(route, today))
            .cloned()
            .collect();
        routes.sort_by_key(|route| (route.travel_date, route.departure_time));

        if let Some(limit) = filters.limit {
            routes.truncate(limit.max(0) as usize);
        }
        Ok(routes)
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn occupied_seats(&self, route_id: Uuid) -> AppResult<BTreeSet<i32>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .reservations
            .iter()
            .filter(|r| r.route_id == route_id)
            .map(|r| r.seat_number)
            .collect())
    }

    async fn create_batch(&self, user_id: Uuid, route_id: Uuid, seats: &[i32]) -> AppResult<Vec<Reservation>> {
        let mut tables = self.tables.lock().await;

        if !tables.routes.contains_key(&route_id) {
            return Err(not_found_error("Route", &route_id.to_string()));
        }
        if !tables.users.contains_key(&user_id) {
            return Err(not_found_error("User", &user_id.to_string()));
        }

        let taken: Vec<i32> = seats
            .iter()
            .copied()
            .filter(|seat| {
                tables
                    .reservations
                    .iter()
                    .any(|r| r.route_id == route_id && r.seat_number == *seat)
            })
            .collect();
        if !taken.is_empty() {
            return Err(SeatSelectionError::AlreadyReserved(taken).into());
        }

        let created: Vec<Reservation> = seats
            .iter()
            .map(|seat| Reservation::new(user_id, route_id, *seat))
            .collect();
        tables.reservations.extend(created.iter().cloned());

        Ok(created)
    }

    async fn list_for_user(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<ReservationWithRoute>> {
        let tables = self.tables.lock().await;
        let mut reservations: Vec<ReservationWithRoute> = tables
            .reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                tables.routes.get(&r.route_id).map(|route| ReservationWithRoute {
                    id: r.id,
                    route_id: r.route_id,
                    seat_number: r.seat_number,
                    created_at: r.created_at,
                    origin: route.origin,
                    destination: route.destination,
                    travel_date: route.travel_date,
                    departure_time: route.departure_time,
                    price: route.price,
                })
            })
            .collect();
        reservations.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(a.seat_number.cmp(&b.seat_number))
        });

        if let Some(limit) = limit {
            reservations.truncate(limit.max(0) as usize);
        }
        Ok(reservations)
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create(&self, user: &User) -> AppResult<User> {
        let mut tables = self.tables.lock().await;
        let username = user.username.to_lowercase();
        let email = user.email.to_lowercase();

        if tables.users.values().any(|u| u.username.to_lowercase() == username) {
            return Err(conflict_error("User", "username", &user.username));
        }
        if tables.users.values().any(|u| u.email.to_lowercase() == email) {
            return Err(conflict_error("User", "email", &user.email));
        }

        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }
}
