//! Utilidades de validación
//!
//! Validadores custom usados por los derives de `validator`.

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::route::NewRoute;

// Columna NUMERIC(7,2): hasta 99999.99
const MAX_ROUTE_PRICE_EXCLUSIVE: i64 = 100_000;
const PRICE_DECIMAL_PLACES: u32 = 2;

fn price_error(code: &'static str, price: &Decimal, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.add_param("actual".into(), &price.to_string());
    error.message = Some(message.into());
    error
}

/// Precio de ruta: positivo, menor a 100000 y con a lo más dos decimales
pub fn validate_route_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(price_error("positive_price", price, "price must be greater than zero"));
    }
    if *price >= Decimal::from(MAX_ROUTE_PRICE_EXCLUSIVE) {
        return Err(price_error("max_price", price, "price must be less than 100000"));
    }
    if price.normalize().scale() > PRICE_DECIMAL_PLACES {
        return Err(price_error(
            "price_decimal_places",
            price,
            "price must have at most 2 decimal places",
        ));
    }
    Ok(())
}

/// Origen y destino deben ser distintos
pub fn validate_distinct_endpoints(route: &NewRoute) -> Result<(), ValidationError> {
    if route.origin == route.destination {
        let mut error = ValidationError::new("distinct_endpoints");
        error.add_param("city".into(), &route.origin.as_str());
        error.message = Some("origin and destination must be different".into());
        return Err(error);
    }
    Ok(())
}
