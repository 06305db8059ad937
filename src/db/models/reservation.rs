//! Reservation model and queries.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::booking::Seat;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Reservation {
    pub id: i64,
    #[sqlx(rename = "passengerName")]
    pub passenger_name: String,
    #[sqlx(rename = "seatRow")]
    pub seat_row: i64,
    #[sqlx(rename = "seatColumn")]
    pub seat_column: i64,
    #[sqlx(rename = "eTicketNumber")]
    pub e_ticket_number: String,
}

/// Fields of a reservation that is about to be stored
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub passenger_name: String,
    pub seat: Seat,
    pub e_ticket_number: String,
}

impl Reservation {
    /// The booked seat, or a validation error for rows outside the grid
    pub fn seat(&self) -> Result<Seat, AppError> {
        Seat::new(self.seat_row, self.seat_column)
    }

    /// Seat label for pages, e.g. "row 3 seat 2"
    pub fn seat_label(&self) -> String {
        format!("row {} seat {}", self.seat_row, self.seat_column)
    }

    /// All reservations, oldest first
    pub async fn list_all(db: &SqlitePool) -> Result<Vec<Reservation>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, passengerName, seatRow, seatColumn, eTicketNumber
            FROM reservations
            ORDER BY id ASC
            "#,
        )
        .fetch_all(db)
        .await
    }

    /// Seats that currently hold a reservation
    pub async fn taken_seats(db: &SqlitePool) -> Result<Vec<(i64, i64)>, sqlx::Error> {
        sqlx::query_as("SELECT seatRow, seatColumn FROM reservations ORDER BY seatRow, seatColumn")
            .fetch_all(db)
            .await
    }

    pub async fn is_seat_taken(db: &SqlitePool, seat: Seat) -> Result<bool, sqlx::Error> {
        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM reservations WHERE seatRow = ? AND seatColumn = ? LIMIT 1",
        )
        .bind(seat.row)
        .bind(seat.column)
        .fetch_optional(db)
        .await?;
        Ok(existing.is_some())
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<Reservation>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, passengerName, seatRow, seatColumn, eTicketNumber
            FROM reservations
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a reservation. A second booking of the same seat fails with
    /// [`AppError::Conflict`] through the unique seat index.
    pub async fn create(db: &SqlitePool, new: &NewReservation) -> Result<Reservation, AppError> {
        let id = sqlx::query(
            r#"
            INSERT INTO reservations (passengerName, seatRow, seatColumn, eTicketNumber)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&new.passenger_name)
        .bind(new.seat.row)
        .bind(new.seat.column)
        .bind(&new.e_ticket_number)
        .execute(db)
        .await?
        .last_insert_rowid();

        Ok(Reservation {
            id,
            passenger_name: new.passenger_name.clone(),
            seat_row: new.seat.row,
            seat_column: new.seat.column,
            e_ticket_number: new.e_ticket_number.clone(),
        })
    }

    /// Delete a reservation by id, returning the removed row
    pub async fn delete(db: &SqlitePool, id: i64) -> Result<Reservation, AppError> {
        let reservation = Self::find_by_id(db, id)
            .await?
            .ok_or(AppError::NotFound(id))?;

        sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;

        Ok(reservation)
    }

    pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
            .fetch_one(db)
            .await
    }
}
