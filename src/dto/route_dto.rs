use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::models::route::{City, Route, RouteFilters};

// Query de disponibilidad: ?origin=Santiago&destination=&date=2030-01-10&limit=3
#[derive(Debug, Default, Deserialize)]
pub struct RouteListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub origin: Option<City>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub destination: Option<City>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
}

impl From<RouteListQuery> for RouteFilters {
    fn from(query: RouteListQuery) -> Self {
        Self {
            origin: query.origin,
            destination: query.destination,
            date: query.date,
            limit: query.limit,
        }
    }
}

/// Un parámetro vacío ("origin=") equivale a no filtrar
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<City> for Coordinates {
    fn from(city: City) -> Self {
        let (lat, lng) = city.coordinates();
        Self { lat, lng }
    }
}

// Response de ruta
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub id: Uuid,
    pub origin: City,
    pub destination: City,
    pub origin_coordinates: Coordinates,
    pub destination_coordinates: Coordinates,
    pub travel_date: NaiveDate,
    pub departure_time: String,
    pub price: String,
    pub created_at: DateTime<Utc>,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            origin: route.origin,
            destination: route.destination,
            origin_coordinates: route.origin.into(),
            destination_coordinates: route.destination.into(),
            travel_date: route.travel_date,
            departure_time: route.departure_time.format("%H:%M").to_string(),
            price: format!("{:.2}", route.price),
            created_at: route.created_at,
        }
    }
}
