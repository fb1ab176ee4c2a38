//! Modelo de Route
//!
//! Este módulo contiene el struct Route, las ciudades servidas y la
//! validación de rutas nuevas. Mapea al schema PostgreSQL con primary key 'id'.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::validation::{validate_distinct_endpoints, validate_route_price};

/// Ciudades servidas - mapea al ENUM city
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "city")]
pub enum City {
    Santiago,
    Valparaiso,
    Concepcion,
}

impl City {
    pub const ALL: [City; 3] = [City::Santiago, City::Valparaiso, City::Concepcion];

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Santiago => "Santiago",
            City::Valparaiso => "Valparaiso",
            City::Concepcion => "Concepcion",
        }
    }

    /// Coordenadas (lat, lng) del terminal de la ciudad
    pub fn coordinates(&self) -> (f64, f64) {
        match self {
            City::Santiago => (-33.4489, -70.6693),
            City::Valparaiso => (-33.0458, -71.6197),
            City::Concepcion => (-36.8201, -73.0444),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .iter()
            .copied()
            .find(|city| city.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown city '{}'", s))
    }
}

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub origin: City,
    pub destination: City,
    pub travel_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Route {
    pub fn departure(&self) -> NaiveDateTime {
        self.travel_date.and_time(self.departure_time)
    }
}

/// Datos para crear una ruta nueva
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_distinct_endpoints", skip_on_field_errors = false))]
pub struct NewRoute {
    pub origin: City,
    pub destination: City,
    pub travel_date: NaiveDate,
    pub departure_time: NaiveTime,

    #[validate(custom = "validate_route_price")]
    pub price: Decimal,
}

impl NewRoute {
    /// Valida campos y exige una salida posterior a `now`
    pub fn validate_at(&self, now: NaiveDateTime) -> Result<(), validator::ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => validator::ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.travel_date.and_time(self.departure_time) < now {
            let mut error = ValidationError::new("future_departure");
            error.message = Some("departure date and time must be in the future".into());
            errors.add("travel_date", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn into_route(self) -> Route {
        Route {
            id: Uuid::new_v4(),
            origin: self.origin,
            destination: self.destination,
            travel_date: self.travel_date,
            departure_time: self.departure_time,
            price: self.price,
            created_at: Utc::now(),
        }
    }
}

/// Filtros de disponibilidad de rutas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteFilters {
    pub origin: Option<City>,
    pub destination: Option<City>,
    pub date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

impl RouteFilters {
    /// Filtro conjuntivo; solo rutas de `today` en adelante
    pub fn matches(&self, route: &Route, today: NaiveDate) -> bool {
        route.travel_date >= today
            && self.origin.map_or(true, |origin| route.origin == origin)
            && self.destination.map_or(true, |destination| route.destination == destination)
            && self.date.map_or(true, |date| route.travel_date == date)
    }
}
