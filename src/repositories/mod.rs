//! Repositorios
//!
//! Acceso a datos detrás de traits, con implementación PostgreSQL para
//! producción y una implementación en memoria para tests.

pub mod memory;
pub mod reservation_repository;
pub mod route_repository;
pub mod user_repository;

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::reservation::{Reservation, ReservationWithRoute};
use crate::models::route::{Route, RouteFilters};
use crate::models::user::User;
use crate::utils::errors::AppResult;

pub use memory::InMemoryStore;
pub use reservation_repository::PgReservationRepository;
pub use route_repository::PgRouteRepository;
pub use user_repository::PgUserRepository;

/// Acceso a rutas
#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn create(&self, route: &Route) -> AppResult<Route>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>>;

    /// Rutas desde `today` en adelante que cumplen los filtros,
    /// ordenadas por fecha y hora de salida
    async fn list_available(&self, filters: &RouteFilters, today: NaiveDate) -> AppResult<Vec<Route>>;
}

/// Acceso a reservas
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Asientos ya reservados de la ruta
    async fn occupied_seats(&self, route_id: Uuid) -> AppResult<BTreeSet<i32>>;

    /// Inserta todas las reservas o ninguna. Si algún asiento ya está tomado
    /// en el almacenamiento devuelve `SeatSelectionError::AlreadyReserved`
    /// con esos asientos.
    async fn create_batch(&self, user_id: Uuid, route_id: Uuid, seats: &[i32]) -> AppResult<Vec<Reservation>>;

    /// Reservas del usuario con su ruta, más recientes primero
    async fn list_for_user(&self, user_id: Uuid, limit: Option<i64>) -> AppResult<Vec<ReservationWithRoute>>;
}

/// Acceso a usuarios
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User) -> AppResult<User>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
}
