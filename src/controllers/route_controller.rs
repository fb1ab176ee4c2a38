use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::dto::route_dto::RouteResponse;
use crate::models::route::{NewRoute, RouteFilters};
use crate::repositories::RouteStore;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct RouteController {
    repository: Arc<dyn RouteStore>,
}

impl RouteController {
    pub fn new(repository: Arc<dyn RouteStore>) -> Self {
        Self { repository }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.routes.clone())
    }

    /// Rutas disponibles desde `today`
    pub async fn list_available(
        &self,
        filters: RouteFilters,
        today: NaiveDate,
    ) -> Result<Vec<RouteResponse>, AppError> {
        if matches!(filters.limit, Some(l) if l < 1) {
            return Err(AppError::BadRequest("limit must be at least 1".to_string()));
        }

        let routes = self.repository.list_available(&filters, today).await?;
        tracing::debug!("🚌 {} rutas disponibles para {:?}", routes.len(), filters);

        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RouteResponse, AppError> {
        let route = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Route", &id.to_string()))?;

        Ok(route.into())
    }

    /// Alta de ruta validada contra el instante `now`
    pub async fn create(
        &self,
        new_route: NewRoute,
        now: chrono::NaiveDateTime,
    ) -> Result<RouteResponse, AppError> {
        new_route.validate_at(now)?;

        let route = self.repository.create(&new_route.into_route()).await?;
        tracing::info!(
            "🆕 Ruta {} creada: {} -> {} el {} a las {}",
            route.id,
            route.origin,
            route.destination,
            route.travel_date,
            route.departure_time
        );

        Ok(route.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::City;
    use crate::repositories::InMemoryStore;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    fn new_route(origin: City, destination: City, price: Decimal) -> NewRoute {
        NewRoute {
            origin,
            destination,
            travel_date: NaiveDate::from_ymd_opt(2030, 5, 20).unwrap(),
            departure_time: NaiveTime::from_hms_opt(8, 15, 0).unwrap(),
            price,
        }
    }

    fn now() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let controller = RouteController::new(Arc::new(InMemoryStore::new()));

        let created = controller
            .create(new_route(City::Valparaiso, City::Concepcion, Decimal::new(9900, 0)), now())
            .await
            .unwrap();
        let fetched = controller.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.departure_time, "08:15");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_route() {
        let store = Arc::new(InMemoryStore::new());
        let controller = RouteController::new(store.clone());

        let same_city = controller
            .create(new_route(City::Santiago, City::Santiago, Decimal::new(9900, 0)), now())
            .await;
        assert!(matches!(same_city, Err(AppError::Validation(_))));

        let free = controller
            .create(new_route(City::Santiago, City::Valparaiso, Decimal::ZERO), now())
            .await;
        assert!(matches!(free, Err(AppError::Validation(_))));

        let too_expensive = controller
            .create(new_route(City::Santiago, City::Valparaiso, Decimal::new(100_000, 0)), now())
            .await;
        assert!(matches!(too_expensive, Err(AppError::Validation(ref e)) if e.field_errors().contains_key("price")));

        let fractional_peso = controller
            .create(new_route(City::Santiago, City::Valparaiso, Decimal::new(1234, 3)), now())
            .await;
        assert!(matches!(fractional_peso, Err(AppError::Validation(_))));

        let late = NaiveDate::from_ymd_opt(2031, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let past = controller
            .create(new_route(City::Santiago, City::Valparaiso, Decimal::new(9900, 0)), late)
            .await;
        assert!(matches!(past, Err(AppError::Validation(_))));

        let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(controller
            .list_available(RouteFilters::default(), today)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_list_rejects_non_positive_limit() {
        let controller = RouteController::new(Arc::new(InMemoryStore::new()));
        let filters = RouteFilters {
            limit: Some(0),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

        let result = controller.list_available(filters, today).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
