//! Servicio de reservas de asientos en rutas de bus
//!
//! Rutas disponibles, mapa de asientos y reserva de asientos con
//! prevención de doble reserva a nivel de base de datos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub use state::AppState;

/// Construir el router completo de la API
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/routes", routes::create_route_router(state.clone()))
        .nest("/api/reservations", routes::create_reservation_router(state.clone()))
        .layer(middleware::cors_layer(&state.config.cors_origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "bus-reservations",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
