//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    InMemoryStore, PgReservationRepository, PgRouteRepository, PgUserRepository, ReservationStore,
    RouteStore, UserStore,
};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub routes: Arc<dyn RouteStore>,
    pub reservations: Arc<dyn ReservationStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            config,
            routes: Arc::new(PgRouteRepository::new(pool.clone())),
            reservations: Arc::new(PgReservationRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }

    /// Estado en memoria compartiendo un único store
    pub fn in_memory(config: EnvironmentConfig, store: Arc<InMemoryStore>) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            config,
            routes: store.clone(),
            reservations: store.clone(),
            users: store,
        }
    }
}
