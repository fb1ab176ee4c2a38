//! Validación de selección de asientos
//!
//! Convierte la lista cruda de asientos enviada por el cliente ("1, 2,3")
//! en números de asiento validados contra la capacidad del bus y el conjunto
//! de asientos ya ocupados de la ruta. No toca la base de datos: quien llama
//! lee los ocupados y persiste el resultado.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::models::reservation::BUS_TOTAL_SEATS;

/// Errores de validación de la selección de asientos
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatSelectionError {
    #[error("select at least one seat.")]
    Empty,

    #[error("invalid seat selection.")]
    Invalid,

    #[error("seat repeated.")]
    Repeated,

    #[error("seats must be between 1 and {max}: {}", join_seats(.seats))]
    OutOfRange { seats: Vec<i64>, max: i32 },

    #[error("seats {} already reserved.", join_seats(.0))]
    AlreadyReserved(Vec<i32>),
}

impl SeatSelectionError {
    /// Los conflictos se reportan igual vengan del pre-chequeo o de la base
    pub fn is_conflict(&self) -> bool {
        matches!(self, SeatSelectionError::AlreadyReserved(_))
    }

    /// Asientos nombrados por el error, si los hay
    pub fn seats(&self) -> Option<Vec<i64>> {
        match self {
            SeatSelectionError::OutOfRange { seats, .. } => Some(seats.clone()),
            SeatSelectionError::AlreadyReserved(seats) => {
                Some(seats.iter().map(|s| i64::from(*s)).collect())
            }
            _ => None,
        }
    }
}

fn join_seats<T: ToString>(seats: &[T]) -> String {
    seats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Valida la selección cruda contra el conjunto de ocupados.
///
/// Los chequeos se aplican en orden: lista vacía, tokens no numéricos,
/// repetidos, fuera de rango y ya reservados. Devuelve los asientos en el
/// orden en que fueron enviados.
pub fn validate_seat_selection(
    raw: &str,
    occupied: &BTreeSet<i32>,
) -> Result<Vec<i32>, SeatSelectionError> {
    let tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(SeatSelectionError::Empty);
    }

    let seats = tokens
        .iter()
        .map(|token| token.parse::<i64>())
        .collect::<Result<Vec<i64>, _>>()
        .map_err(|_| SeatSelectionError::Invalid)?;

    let unique: HashSet<i64> = seats.iter().copied().collect();
    if unique.len() != seats.len() {
        return Err(SeatSelectionError::Repeated);
    }

    let out_of_range: Vec<i64> = seats
        .iter()
        .copied()
        .filter(|seat| *seat < 1 || *seat > i64::from(BUS_TOTAL_SEATS))
        .collect();
    if !out_of_range.is_empty() {
        return Err(SeatSelectionError::OutOfRange {
            seats: out_of_range,
            max: BUS_TOTAL_SEATS,
        });
    }

    // Rango ya validado: la conversión no puede fallar
    let seats: Vec<i32> = seats.into_iter().map(|seat| seat as i32).collect();

    let taken: Vec<i32> = seats
        .iter()
        .copied()
        .filter(|seat| occupied.contains(seat))
        .collect();
    if !taken.is_empty() {
        return Err(SeatSelectionError::AlreadyReserved(taken));
    }

    Ok(seats)
}

/// Asientos libres de una ruta, ordenados
pub fn available_seats(occupied: &BTreeSet<i32>) -> Vec<i32> {
    (1..=BUS_TOTAL_SEATS)
        .filter(|seat| !occupied.contains(seat))
        .collect()
}
