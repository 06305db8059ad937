use serde::Serialize;

use crate::error::{AppError, INVALID_SEAT, OUT_OF_RANGE};

/// Number of seat rows on the flight
pub const ROWS: i64 = 12;

/// Number of seats per row
pub const COLUMNS: i64 = 4;

/// A bookable position, 1-indexed in both directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Seat {
    pub row: i64,
    pub column: i64,
}

impl Seat {
    /// Build a seat from already-parsed numbers, checking the grid bounds
    pub fn new(row: i64, column: i64) -> Result<Self, AppError> {
        if !(1..=ROWS).contains(&row) || !(1..=COLUMNS).contains(&column) {
            return Err(AppError::Validation(OUT_OF_RANGE));
        }
        Ok(Self { row, column })
    }

    /// Parse raw form fields. Integer parsing is checked before the range.
    pub fn parse(row: &str, column: &str) -> Result<Self, AppError> {
        let row: i64 = row
            .trim()
            .parse()
            .map_err(|_| AppError::Validation(INVALID_SEAT))?;
        let column: i64 = column
            .trim()
            .parse()
            .map_err(|_| AppError::Validation(INVALID_SEAT))?;
        Self::new(row, column)
    }

    /// Every seat on the grid, row by row
    pub fn all() -> impl Iterator<Item = Seat> {
        (1..=ROWS).flat_map(|row| (1..=COLUMNS).map(move |column| Seat { row, column }))
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {} seat {}", self.row, self.column)
    }
}
