use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::route::{Route, RouteFilters};
use crate::repositories::RouteStore;
use crate::utils::errors::{AppError, AppResult};

pub struct PgRouteRepository {
    pool: PgPool,
}

impl PgRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteStore for PgRouteRepository {
    async fn create(&self, route: &Route) -> AppResult<Route> {
        let created = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, origin, destination, travel_date, departure_time, price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, origin, destination, travel_date, departure_time, price, created_at
            "#,
        )
        .bind(route.id)
        .bind(route.origin)
        .bind(route.destination)
        .bind(route.travel_date)
        .bind(route.departure_time)
        .bind(route.price)
        .bind(route.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_insert_error(e, "Route"))?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            SELECT id, origin, destination, travel_date, departure_time, price, created_at
            FROM routes WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(route)
    }

    async fn list_available(&self, filters: &RouteFilters, today: NaiveDate) -> AppResult<Vec<Route>> {
        let routes = sqlx::query_as::<_, Route>(
            r#"
            SELECT id, origin, destination, travel_date, departure_time, price, created_at
            FROM routes
            WHERE travel_date >= $1
              AND ($2::city IS NULL OR origin = $2)
              AND ($3::city IS NULL OR destination = $3)
              AND ($4::date IS NULL OR travel_date = $4)
            ORDER BY travel_date, departure_time
            LIMIT $5
            "#,
        )
        .bind(today)
        .bind(filters.origin)
        .bind(filters.destination)
        .bind(filters.date)
        .bind(filters.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }
}

