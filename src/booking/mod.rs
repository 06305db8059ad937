//! Seat booking rules: seat parsing, pricing, ticket codes and the
//! reservation workflow that ties them to the store.

pub mod pricing;
pub mod seat;
pub mod ticket;

pub use pricing::{price_for, price_table, total_sales, PriceTable};
pub use seat::{Seat, COLUMNS, ROWS};
pub use ticket::{generate_ticket_code, is_valid_ticket_code};

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::{NewReservation, Reservation};
use crate::error::{AppError, SEAT_TAKEN};

/// Label of an empty cell in the seating chart
pub const AVAILABLE: &str = "Available";

/// Reservation form as posted by the browser. Missing fields read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub row: String,
    #[serde(default)]
    pub column: String,
}

impl ReservationForm {
    pub fn passenger_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Validate the form, check availability and store a new reservation.
///
/// Checks run in order: integer parsing, grid range, availability. The
/// availability check gives the common case its message; the unique seat
/// index catches a concurrent booking that slips past it.
pub async fn reserve(db: &SqlitePool, form: &ReservationForm) -> Result<Reservation, AppError> {
    let seat = Seat::parse(&form.row, &form.column).map_err(|e| {
        debug!(row = %form.row, column = %form.column, "Rejected seat input: {}", e);
        e
    })?;

    if Reservation::is_seat_taken(db, seat).await? {
        debug!(%seat, "Seat already reserved");
        return Err(AppError::Conflict(SEAT_TAKEN));
    }

    let reservation = Reservation::create(
        db,
        &NewReservation {
            passenger_name: form.passenger_name(),
            seat,
            e_ticket_number: generate_ticket_code(),
        },
    )
    .await?;

    info!(
        id = reservation.id,
        ticket = %reservation.e_ticket_number,
        "Reserved {}",
        seat
    );
    Ok(reservation)
}

/// Seating chart for the dashboard: one row per seat row, each cell either
/// [`AVAILABLE`] or the name of the passenger in that seat.
pub fn seating_chart(reservations: &[Reservation]) -> Vec<Vec<String>> {
    let mut chart = vec![vec![AVAILABLE.to_string(); COLUMNS as usize]; ROWS as usize];
    for reservation in reservations {
        let Ok(seat) = reservation.seat() else {
            continue;
        };
        chart[(seat.row - 1) as usize][(seat.column - 1) as usize] =
            reservation.passenger_name.clone();
    }
    chart
}
