//! Error kinds for the reservation service.
//!
//! Every variant is recovered inside the request handlers and turned into a
//! redirect with a flash message, so none of them ever reaches the browser as
//! an error status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range seat input
    #[error("validation error: {0}")]
    Validation(&'static str),

    /// The requested seat is already booked
    #[error("conflict: {0}")]
    Conflict(&'static str),

    /// Bad credentials or missing admin session
    #[error("authentication failed")]
    Auth,

    /// No reservation with this id
    #[error("reservation {0} not found")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

pub const INVALID_SEAT: &str = "invalid seat";
pub const OUT_OF_RANGE: &str = "out of range";
pub const SEAT_TAKEN: &str = "seat taken";

impl AppError {
    /// Text shown to the user in the flash message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(OUT_OF_RANGE) => "Seat must be row 1–12, column 1–4.".to_string(),
            AppError::Validation(_) => "Please select a valid seat.".to_string(),
            AppError::Conflict(_) => "Seat already taken.".to_string(),
            AppError::Auth => "Invalid credentials".to_string(),
            AppError::NotFound(_) => "Reservation not found.".to_string(),
            AppError::Database(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.message().contains("UNIQUE constraint failed") {
                return AppError::Conflict(SEAT_TAKEN);
            }
        }
        AppError::Database(err)
    }
}
