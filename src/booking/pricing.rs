//! Static seat pricing.
//!
//! Every row has the same prices, so the table is one row repeated twelve
//! times.

use super::seat::{Seat, COLUMNS, ROWS};
use crate::db::Reservation;

/// Price of each column, left to right
const ROW_PRICES: [i64; COLUMNS as usize] = [100, 75, 50, 100];

pub type PriceTable = [[i64; COLUMNS as usize]; ROWS as usize];

/// The full 12x4 price grid, indexed `[row - 1][column - 1]`
pub fn price_table() -> PriceTable {
    [ROW_PRICES; ROWS as usize]
}

/// Price of a single seat
pub fn price_for(seat: Seat) -> i64 {
    lookup(seat.row, seat.column)
}

/// Sum of the seat prices of every reservation
pub fn total_sales(reservations: &[Reservation]) -> i64 {
    reservations
        .iter()
        .map(|r| lookup(r.seat_row, r.seat_column))
        .sum()
}

// Rows read back from the store are not re-validated; anything off the grid
// is worth nothing.
fn lookup(row: i64, column: i64) -> i64 {
    let (Ok(r), Ok(c)) = (usize::try_from(row - 1), usize::try_from(column - 1)) else {
        return 0;
    };
    price_table()
        .get(r)
        .and_then(|prices| prices.get(c))
        .copied()
        .unwrap_or(0)
}
